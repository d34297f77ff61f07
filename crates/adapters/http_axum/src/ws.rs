//! WebSocket transport for the device protocol.
//!
//! Each upgraded socket is split in two. The reading half feeds text frames
//! into a [`Session`]; the writing half drains the session's [`ChannelSink`]
//! so the dispatcher and every staged chain share one ordered send path.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::Instrument;

use fridgesim_app::channel_sink::ChannelSink;
use fridgesim_app::services::session::{Dispatch, Session};
use fridgesim_domain::envelope::Outbound;
use fridgesim_domain::id::ConnectionId;

use crate::state::AppState;

/// Outbound envelopes buffered per connection before producers wait.
const OUTBOUND_CAPACITY: usize = 64;

/// `GET /ws`: upgrade to the device protocol.
pub async fn upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| {
        let connection = ConnectionId::new();
        serve(socket, state).instrument(tracing::info_span!("connection", %connection))
    })
}

async fn serve(socket: WebSocket, state: AppState) {
    tracing::info!("client connected");

    let (writer, mut reader) = socket.split();
    let (sink, outbound) = ChannelSink::new(OUTBOUND_CAPACITY);
    let forward = tokio::spawn(forward(outbound, writer).in_current_span());

    let mut session = Session::new(Arc::clone(&state.catalog), state.policy, sink);

    while let Some(frame) = reader.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(Message::Binary(_)) => {
                tracing::debug!("ignoring binary frame");
                continue;
            }
            Ok(_) => continue,
            Err(err) => {
                tracing::debug!(error = %err, "websocket read failed");
                break;
            }
        };

        match session.handle(text.as_str()).await {
            Ok(Dispatch::Answered { event, staged, .. }) => {
                tracing::debug!(%event, staged, "request answered");
            }
            Ok(Dispatch::Malformed | Dispatch::Rejected(_)) => {}
            Err(err) => {
                tracing::debug!(error = %err, "outbound path closed");
                break;
            }
        }
    }

    let abandoned = session.pending();
    session.abort_staged();
    forward.abort();

    tracing::info!(abandoned, "client disconnected");
}

/// Write every outbound envelope to the socket until either side goes away.
///
/// A message counts as sent once the socket accepted the frame.
async fn forward<W>(mut outbound: mpsc::Receiver<Outbound>, mut writer: W)
where
    W: Sink<Message> + Unpin,
    W::Error: std::fmt::Display,
{
    while let Some(message) = outbound.recv().await {
        let text = match message.to_json() {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    event = message.event(),
                    "failed to serialise envelope"
                );
                continue;
            }
        };
        if let Err(err) = writer.send(Message::Text(text.into())).await {
            tracing::debug!(error = %err, event = message.event(), "websocket write failed");
            break;
        }
        tracing::info!(
            outcome = "success",
            event = message.event(),
            reference = %message
                .reference()
                .map_or_else(String::new, ToString::to_string),
            "message sent"
        );
    }
}
