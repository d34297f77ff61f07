//! Outbound port: where a connection's answers go.

use std::future::Future;

use fridgesim_domain::envelope::Outbound;

/// The connection the sink writes to is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("connection closed")]
pub struct SinkError;

/// Delivers outbound envelopes to one client connection, in call order.
pub trait OutboundSink: Send + Sync {
    /// Queue a message for the client.
    ///
    /// Fails only once the connection has gone away; callers treat that as a
    /// signal to stop producing, not as something to retry.
    fn send(&self, message: Outbound) -> impl Future<Output = Result<(), SinkError>> + Send;
}

impl<T: OutboundSink> OutboundSink for std::sync::Arc<T> {
    fn send(&self, message: Outbound) -> impl Future<Output = Result<(), SinkError>> + Send {
        (**self).send(message)
    }
}
