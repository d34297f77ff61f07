//! # fridgesim-app
//!
//! Application layer: the command-flow engine and its **port definitions**.
//!
//! ## Responsibilities
//! - Define the outbound port [`ports::OutboundSink`] that transports implement
//! - Validate inbound text into a request or a list of problems
//! - Select the acknowledgment and primary answer from the script catalog
//! - Schedule staged pushes as a sequential timer chain
//! - Drive one connection through [`services::session::Session`]
//! - Provide an in-process channel sink that transports can drain
//!
//! ## Dependency rule
//! Depends on `fridgesim-domain` only (plus `tokio` for timers, tasks and
//! channels). Never imports adapter crates.

pub mod channel_sink;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
