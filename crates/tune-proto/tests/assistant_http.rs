//! Drives `GeminiAssistant` against a local axum server that stands in for the
//! generateContent endpoint.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use tune_proto::assistant::{
    Assistant, AssistantError, GeminiAssistant, FALLBACK_EMPTY, FALLBACK_NO_KEY,
    FALLBACK_UNREACHABLE,
};

#[derive(Debug, Clone)]
struct Seen {
    call: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<Seen>>>,
}

async fn generate(
    State(state): State<MockState>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .seen
        .lock()
        .unwrap()
        .push(Seen { call, api_key, body });
    (state.status, Json(state.reply.clone()))
}

async fn spawn_mock(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<Seen>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v1beta/models/:call", post(generate))
        .with_state(MockState {
            status,
            reply,
            seen: Arc::clone(&seen),
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{}", addr), seen)
}

fn assistant(endpoint: &str, key: Option<&str>) -> GeminiAssistant {
    GeminiAssistant::new(
        key.map(str::to_string),
        "gemini-3-flash-preview",
        endpoint,
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn success_returns_candidate_text() {
    let reply = json!({
        "candidates": [{
            "content": { "parts": [{ "text": "1. Track X — Artist Y\n2. Track Z — Artist W\n" }] }
        }]
    });
    let (endpoint, seen) = spawn_mock(StatusCode::OK, reply).await;

    let text = assistant(&endpoint, Some("test-key"))
        .recommend("upbeat gym mix")
        .await;
    assert_eq!(text, "1. Track X — Artist Y\n2. Track Z — Artist W");

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].call, "gemini-3-flash-preview:generateContent");
    assert_eq!(seen[0].api_key.as_deref(), Some("test-key"));
    let prompt = seen[0].body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(prompt.contains("upbeat gym mix"));
}

#[tokio::test]
async fn empty_candidates_fall_back() {
    let (endpoint, _seen) = spawn_mock(StatusCode::OK, json!({ "candidates": [] })).await;
    let a = assistant(&endpoint, Some("k"));

    assert!(matches!(
        a.generate("sad").await,
        Err(AssistantError::EmptyResponse)
    ));
    assert_eq!(a.recommend("sad").await, FALLBACK_EMPTY);
}

#[tokio::test]
async fn server_error_falls_back() {
    let (endpoint, _seen) = spawn_mock(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": { "message": "boom" } }),
    )
    .await;
    let a = assistant(&endpoint, Some("k"));

    match a.generate("party").await {
        Err(AssistantError::Status(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(a.recommend("party").await, FALLBACK_UNREACHABLE);
}

#[tokio::test]
async fn unreachable_host_falls_back() {
    // Bind then drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let a = assistant(&format!("http://{}", addr), Some("k"));
    assert_eq!(a.recommend("jazz").await, FALLBACK_UNREACHABLE);
}

#[tokio::test]
async fn missing_key_never_reaches_server() {
    let (endpoint, seen) = spawn_mock(StatusCode::OK, json!({})).await;
    let text = assistant(&endpoint, None).recommend("relax").await;
    assert_eq!(text, FALLBACK_NO_KEY);
    assert!(seen.lock().unwrap().is_empty());
}
