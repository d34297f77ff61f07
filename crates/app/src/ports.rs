//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the command-flow engine and the outside
//! world. The engine never touches a socket: it hands finished envelopes to
//! an [`OutboundSink`] and the transport adapter decides how to frame them.

pub mod outbound;

pub use outbound::{OutboundSink, SinkError};
