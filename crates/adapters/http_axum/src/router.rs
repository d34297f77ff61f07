//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// The device protocol is served at `/ws` and at `/`, introspection routes
/// under `/api`. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/", get(crate::ws::upgrade))
        .route("/ws", get(crate::ws::upgrade))
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use fridgesim_domain::catalog::ScriptCatalog;
    use fridgesim_domain::command::{CommandDefinition, FlowDirective};
    use fridgesim_domain::fixture::FixtureBundle;
    use fridgesim_domain::payload::{Acknowledgment, SuccessBody};
    use fridgesim_domain::problem::RequestPolicy;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let catalog = ScriptCatalog::builder()
            .command(
                CommandDefinition::new("check_machine_state", FlowDirective::success()),
                FixtureBundle::new(
                    Acknowledgment::accepted("PUBLIC007"),
                    SuccessBody::ok("Machine is available for API Dispensing"),
                ),
            )
            .build()
            .unwrap();
        AppState::new(catalog, RequestPolicy::Lenient)
    }

    async fn send_get(uri: &str) -> axum::response::Response {
        build(test_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = send_get("/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn should_list_commands_as_json() {
        let response = send_get("/api/commands").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "name": "check_machine_state",
                "flow": {"send_success": true, "error_index": 0},
                "in_progress_event": null,
                "required_fields": [],
                "staged_events": 0,
            }])
        );
    }

    #[tokio::test]
    async fn should_reject_plain_get_on_websocket_routes() {
        for uri in ["/ws", "/"] {
            let response = send_get(uri).await;
            assert!(
                response.status().is_client_error(),
                "{uri} answered {}",
                response.status()
            );
        }
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_routes() {
        let response = send_get("/nope").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
