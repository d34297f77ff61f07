//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod commands;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/commands", get(commands::list))
}
