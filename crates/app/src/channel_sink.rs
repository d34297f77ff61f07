//! In-process outbound sink backed by a tokio [`mpsc`] channel.
//!
//! Transport adapters own the receiving half and write whatever comes out of
//! it to their socket, so every producer for a connection (the dispatcher and
//! any number of staged chains) shares a single ordered send path.

use tokio::sync::mpsc;

use fridgesim_domain::envelope::Outbound;

use crate::ports::{OutboundSink, SinkError};

/// Cloneable sending half of a connection's outbound queue.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::Sender<Outbound>,
}

impl ChannelSink {
    /// Create a sink and the receiver its messages come out of.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Outbound>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl OutboundSink for ChannelSink {
    async fn send(&self, message: Outbound) -> Result<(), SinkError> {
        self.sender.send(message).await.map_err(|_| SinkError)
    }
}
