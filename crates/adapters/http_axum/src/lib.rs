//! # fridgesim-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Accept WebSocket upgrades at `/ws` (and `/`) and run one
//!   [`fridgesim_app::services::session::Session`] per connection
//! - Write every outbound envelope as a JSON text frame, in the order the
//!   session produced it
//! - Serve `/health` and the read-only `/api/commands` introspection endpoint
//!
//! ## Dependency rule
//! Depends on `fridgesim-app` (session, channel sink) and `fridgesim-domain`
//! (catalog and envelope types). Never leaks axum types into the domain.

pub mod api;
pub mod router;
pub mod state;
pub mod ws;
