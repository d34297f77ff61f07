//! End-to-end tests for the full fridgesimd stack.
//!
//! HTTP routes are exercised through `tower::ServiceExt::oneshot`. The
//! device protocol is exercised over a real TCP listener with a
//! `tokio-tungstenite` client and a short stage delay.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use fridgesim_adapter_fixtures::standard_catalog;
use fridgesim_adapter_http_axum::router;
use fridgesim_adapter_http_axum::state::AppState;
use fridgesim_domain::catalog::ScriptCatalogBuilder;
use fridgesim_domain::command::FlowDirective;
use fridgesim_domain::problem::RequestPolicy;
use futures_util::{SinkExt, StreamExt};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tower::ServiceExt;

const STAGE_DELAY_MS: u64 = 20;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

fn catalog() -> ScriptCatalogBuilder {
    standard_catalog().stage_delay_ms(STAGE_DELAY_MS)
}

fn app(builder: ScriptCatalogBuilder, policy: RequestPolicy) -> axum::Router {
    let catalog = builder.build().expect("built-in catalog should build");
    router::build(AppState::new(catalog, policy))
}

async fn serve(builder: ScriptCatalogBuilder, policy: RequestPolicy) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app(builder, policy);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn connect(addr: SocketAddr, path: &str) -> Client {
    let (client, _response) = connect_async(format!("ws://{addr}{path}")).await.unwrap();
    client
}

async fn send(client: &mut Client, payload: &Value) {
    client
        .send(Message::Text(payload.to_string().into()))
        .await
        .unwrap();
}

async fn receive(client: &mut Client) -> Value {
    loop {
        let frame = timeout(Duration::from_secs(2), client.next())
            .await
            .expect("a message should arrive")
            .expect("connection should stay open")
            .unwrap();
        match frame {
            Message::Text(text) => return serde_json::from_str(text.as_str()).unwrap(),
            Message::Ping(_) | Message::Pong(_) => {}
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}

async fn receive_many(client: &mut Client, count: usize) -> Vec<Value> {
    let mut messages = Vec::with_capacity(count);
    for _ in 0..count {
        messages.push(receive(client).await);
    }
    messages
}

async fn assert_silent(client: &mut Client) {
    let quiet = Duration::from_millis(STAGE_DELAY_MS * 5);
    assert!(
        timeout(quiet, client.next()).await.is_err(),
        "no message should be sent"
    );
}

fn door_open(reference: &str) -> Value {
    json!({
        "ref": reference,
        "command": "smart_fridge_door_open",
        "command_data": {"public_api_token": "token", "machine_uid": "machine-1"},
    })
}

fn events(messages: &[Value]) -> Vec<&str> {
    messages
        .iter()
        .map(|m| {
            m.get("command")
                .or_else(|| m.get("respond"))
                .and_then(Value::as_str)
                .unwrap()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// HTTP routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app(catalog(), RequestPolicy::Lenient)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn should_list_built_in_commands() {
    let resp = app(catalog(), RequestPolicy::Lenient)
        .oneshot(
            Request::builder()
                .uri("/api/commands")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let commands: Value = serde_json::from_slice(&body).unwrap();
    let summary: Vec<(&str, u64)> = commands
        .as_array()
        .unwrap()
        .iter()
        .map(|c| {
            (
                c["name"].as_str().unwrap(),
                c["staged_events"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        [
            ("check_machine_state", 0),
            ("smart_fridge_door_open", 6),
            ("smart_fridge_request", 0),
        ]
    );
}

// ---------------------------------------------------------------------------
// Immediate answers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_send_ack_then_success_for_known_command() {
    let addr = serve(catalog(), RequestPolicy::Lenient).await;
    let mut client = connect(addr, "/ws").await;

    send(
        &mut client,
        &json!({"ref": "r1", "command": "check_machine_state", "command_data": {}}),
    )
    .await;

    let messages = receive_many(&mut client, 2).await;
    assert_eq!(
        messages[0],
        json!({
            "respond": "check_machine_state",
            "respond_data": {"ack_status": 1, "ack_code": "PUBLIC007"},
            "ref": "r1",
        })
    );
    assert_eq!(
        messages[1],
        json!({
            "command": "check_machine_state_success",
            "command_data": {
                "status": 1,
                "error_data": [],
                "json_data": {"code": 1, "message": "Machine is available for API Dispensing"},
            },
            "ref": "r1",
        })
    );
    assert_silent(&mut client).await;
}

#[tokio::test]
async fn should_send_configured_error_fixture() {
    let builder = catalog().flow_override("check_machine_state", FlowDirective::error(2));
    let addr = serve(builder, RequestPolicy::Lenient).await;
    let mut client = connect(addr, "/ws").await;

    send(
        &mut client,
        &json!({"ref": "r1", "command": "check_machine_state", "command_data": {}}),
    )
    .await;

    let messages = receive_many(&mut client, 2).await;
    assert_eq!(messages[0]["respond"], "check_machine_state");
    assert_eq!(
        messages[1],
        json!({
            "command": "check_machine_state_error",
            "command_data": {
                "status": 0,
                "error_data": {"code": -3, "message": "Invalid Machine UID"},
                "json_data": [],
            },
            "ref": "r1",
        })
    );
}

#[tokio::test]
async fn should_answer_request_with_begun_event() {
    let addr = serve(catalog(), RequestPolicy::Lenient).await;
    let mut client = connect(addr, "/ws").await;

    send(
        &mut client,
        &json!({"ref": "r9", "command": "smart_fridge_request", "command_data": {}}),
    )
    .await;

    let messages = receive_many(&mut client, 2).await;
    assert_eq!(messages[0]["respond_data"]["ack_code"], "PUBLIC010");
    assert_eq!(messages[1]["command"], "smart_fridge_request_begun");
    assert_eq!(messages[1]["command_data"]["status"], 1);
    assert_eq!(messages[1]["ref"], "r9");
}

#[tokio::test]
async fn should_serve_protocol_at_root_path() {
    let addr = serve(catalog(), RequestPolicy::Lenient).await;
    let mut client = connect(addr, "/").await;

    send(
        &mut client,
        &json!({"ref": "r1", "command": "check_machine_state", "command_data": {}}),
    )
    .await;

    let messages = receive_many(&mut client, 2).await;
    assert_eq!(
        events(&messages),
        ["check_machine_state", "check_machine_state_success"]
    );
}

// ---------------------------------------------------------------------------
// Rejected requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_stay_silent_for_unknown_command_and_keep_connection() {
    let addr = serve(catalog(), RequestPolicy::Lenient).await;
    let mut client = connect(addr, "/ws").await;

    send(
        &mut client,
        &json!({"ref": "r1", "command": "make_coffee", "command_data": {}}),
    )
    .await;
    assert_silent(&mut client).await;

    send(
        &mut client,
        &json!({"ref": "r2", "command": "check_machine_state", "command_data": {}}),
    )
    .await;
    let messages = receive_many(&mut client, 2).await;
    assert_eq!(messages[0]["ref"], "r2");
}

#[tokio::test]
async fn should_send_nothing_when_command_missing() {
    let addr = serve(catalog(), RequestPolicy::Lenient).await;
    let mut client = connect(addr, "/ws").await;

    send(
        &mut client,
        &json!({"ref": "r1", "command_data": {"machine_uid": "M-1"}}),
    )
    .await;
    assert_silent(&mut client).await;
}

#[tokio::test]
async fn should_stay_silent_for_malformed_payload() {
    let addr = serve(catalog(), RequestPolicy::Lenient).await;
    let mut client = connect(addr, "/ws").await;

    client
        .send(Message::Text("{not json".into()))
        .await
        .unwrap();
    client.send(Message::Text("[1, 2]".into())).await.unwrap();
    assert_silent(&mut client).await;

    send(
        &mut client,
        &json!({"ref": "r3", "command": "check_machine_state", "command_data": {}}),
    )
    .await;
    let messages = receive_many(&mut client, 2).await;
    assert_eq!(messages[1]["ref"], "r3");
}

#[tokio::test]
async fn should_answer_without_ref_when_lenient() {
    let addr = serve(catalog(), RequestPolicy::Lenient).await;
    let mut client = connect(addr, "/ws").await;

    send(
        &mut client,
        &json!({"command": "check_machine_state", "command_data": {}}),
    )
    .await;

    let messages = receive_many(&mut client, 2).await;
    assert!(messages[0].get("ref").is_none());
    assert_eq!(messages[1]["command"], "check_machine_state_success");
}

#[tokio::test]
async fn should_echo_non_string_ref_unchanged() {
    let addr = serve(catalog(), RequestPolicy::Lenient).await;
    let mut client = connect(addr, "/ws").await;

    send(
        &mut client,
        &json!({"ref": 7, "command": "check_machine_state", "command_data": {}}),
    )
    .await;
    let messages = receive_many(&mut client, 2).await;
    assert!(messages.iter().all(|m| m["ref"] == json!(7)));

    let reference = json!({"session": "s-1", "seq": 2});
    send(
        &mut client,
        &json!({"ref": reference.clone(), "command": "check_machine_state", "command_data": {}}),
    )
    .await;
    let messages = receive_many(&mut client, 2).await;
    assert!(messages.iter().all(|m| m["ref"] == reference));
}

#[tokio::test]
async fn should_block_request_without_ref_when_strict() {
    let addr = serve(catalog(), RequestPolicy::Strict).await;
    let mut client = connect(addr, "/ws").await;

    send(
        &mut client,
        &json!({"command": "check_machine_state", "command_data": {}}),
    )
    .await;
    assert_silent(&mut client).await;
}

// ---------------------------------------------------------------------------
// Staged events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_play_door_open_script_in_order() {
    let addr = serve(catalog(), RequestPolicy::Lenient).await;
    let mut client = connect(addr, "/ws").await;

    send(&mut client, &door_open("door-1")).await;

    let messages = receive_many(&mut client, 8).await;
    assert_eq!(
        events(&messages),
        [
            "smart_fridge_door_open",
            "smart_fridge_door_open_success",
            "smart_fridge_product_taken",
            "smart_fridge_product_taken",
            "smart_fridge_product_taken",
            "smart_fridge_product_taken",
            "smart_fridge_door_close_success",
            "smart_fridge_request_completed",
        ]
    );
    assert!(messages.iter().all(|m| m["ref"] == "door-1"));
    assert_eq!(
        messages[1]["command_data"]["json_data"]["data"],
        json!([{"door_status": "OPENED"}])
    );
    assert_eq!(
        messages[6]["command_data"]["json_data"]["data"],
        json!({"door_status": "LOCKED"})
    );

    let completed = &messages[7]["command_data"]["json_data"]["data"];
    assert_eq!(completed["transaction_status"], 1);
    assert_eq!(completed["transaction_total"], json!(11.2));
    assert_eq!(
        completed["transaction_product"].as_array().map(Vec::len),
        Some(3)
    );
    assert_silent(&mut client).await;
}

#[tokio::test]
async fn should_keep_each_request_ordered_when_scripts_interleave() {
    let addr = serve(catalog(), RequestPolicy::Lenient).await;
    let mut client = connect(addr, "/ws").await;

    send(&mut client, &door_open("a")).await;
    send(&mut client, &door_open("b")).await;

    let messages = receive_many(&mut client, 16).await;
    let of = |reference: &str| -> Vec<Value> {
        messages
            .iter()
            .filter(|m| m["ref"] == reference)
            .cloned()
            .collect()
    };
    let a = of("a");
    let b = of("b");

    assert_eq!(a.len(), 8);
    assert_eq!(events(&a), events(&b));
    assert_eq!(events(&a).last(), Some(&"smart_fridge_request_completed"));

    let strip = |m: &Value| {
        let mut m = m.clone();
        m["ref"] = Value::Null;
        m
    };
    assert!(a.iter().zip(&b).all(|(x, y)| strip(x) == strip(y)));
}

#[tokio::test]
async fn should_keep_serving_after_client_leaves_mid_script() {
    let addr = serve(catalog(), RequestPolicy::Lenient).await;

    let mut first = connect(addr, "/ws").await;
    send(&mut first, &door_open("gone")).await;
    let _ = receive_many(&mut first, 2).await;
    first.close(None).await.unwrap();
    drop(first);

    tokio::time::sleep(Duration::from_millis(STAGE_DELAY_MS * 8)).await;

    let mut second = connect(addr, "/ws").await;
    send(
        &mut second,
        &json!({"ref": "r1", "command": "check_machine_state", "command_data": {}}),
    )
    .await;
    let messages = receive_many(&mut second, 2).await;
    assert!(messages.iter().all(|m| m["ref"] == "r1"));
    assert_silent(&mut second).await;
}
