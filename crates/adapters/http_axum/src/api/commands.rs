//! Read-only view of the loaded script catalog.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use fridgesim_domain::catalog::ScriptCatalog;
use fridgesim_domain::command::FlowDirective;

use crate::state::AppState;

/// One known command as reported by `GET /api/commands`.
#[derive(Debug, Serialize)]
pub struct CommandSummary {
    pub name: String,
    pub flow: FlowDirective,
    /// Event sent instead of the success/error answer, if any.
    pub in_progress_event: Option<String>,
    pub required_fields: Vec<String>,
    pub staged_events: usize,
}

impl CommandSummary {
    fn collect(catalog: &ScriptCatalog) -> Vec<Self> {
        catalog
            .definitions()
            .map(|definition| Self {
                name: definition.name.clone(),
                flow: definition.flow,
                in_progress_event: definition.in_progress_event(),
                required_fields: definition.required_fields.clone(),
                staged_events: catalog
                    .staged_events(&definition.name)
                    .map_or(0, <[_]>::len),
            })
            .collect()
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<CommandSummary>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/commands`
pub async fn list(State(state): State<AppState>) -> ListResponse {
    ListResponse::Ok(Json(CommandSummary::collect(&state.catalog)))
}
