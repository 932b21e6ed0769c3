mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::{json, Value};
use tower::ServiceExt;

use mock_interview::daemon::{build_router, AppState};
use mock_interview::domains::transcript::Role;
use mock_interview::providers::openai::OpenAiProvider;

use common::{completion_body, QueueProvider};

fn chat_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn openai_state(base_url: String) -> AppState {
    let provider = OpenAiProvider::new(
        "key".to_string(),
        Some("openrouter/free".to_string()),
        Some(base_url),
    );
    AppState::new(Arc::new(provider), "You are Alex.")
}

#[tokio::test]
async fn daemon_health() {
    let app = build_router(AppState::new(
        Arc::new(QueueProvider::replying(&[])),
        "sys",
    ));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let value = json_body(response).await;
    assert_eq!(value["status"], json!("ok"));
    let version = value["version"].as_str().unwrap();
    assert!(version.starts_with(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn daemon_chat_relays_transcript_to_completion_api() {
    let server = MockServer::start_async().await;
    let chat_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer key")
                .header("http-referer", "http://localhost:3000");
            then.status(200).json_body(completion_body("Which role?"));
        })
        .await;

    let state = openai_state(server.base_url());
    let app = build_router(state.clone());

    let response = app
        .oneshot(chat_request(json!({"message": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let value = json_body(response).await;
    assert_eq!(value["reply"], json!("Which role?"));
    chat_mock.assert_calls(1);

    let transcript = state.conversation.transcript().await;
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].role, Role::System);
    assert_eq!(transcript[1].content, "hello");
    assert_eq!(transcript[2].role, Role::Assistant);
    assert_eq!(transcript[2].content, "Which role?");
}

#[tokio::test]
async fn daemon_chat_upstream_failure_is_generic_500() {
    let server = MockServer::start_async().await;
    let chat_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429)
                .json_body(json!({"error": {"message": "rate limited"}}));
        })
        .await;

    let state = openai_state(server.base_url());
    let app = build_router(state.clone());

    let response = app
        .oneshot(chat_request(json!({"message": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let value = json_body(response).await;
    assert_eq!(value, json!({"error": "Alex is temporarily unavailable."}));
    chat_mock.assert_calls(1);

    let transcript = state.conversation.transcript().await;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].role, Role::User);
}

#[tokio::test]
async fn daemon_chat_unreachable_provider_is_generic_500() {
    let state = openai_state("http://127.0.0.1:9/v1".to_string());
    let app = build_router(state);

    let response = app
        .oneshot(chat_request(json!({"message": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let value = json_body(response).await;
    assert_eq!(value["error"], json!("Alex is temporarily unavailable."));
}

#[tokio::test]
async fn daemon_chat_reply_without_content_is_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let app = build_router(openai_state(server.base_url()));
    let response = app
        .oneshot(chat_request(json!({"message": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn daemon_chat_forwards_empty_and_missing_messages_as_is() {
    let provider = Arc::new(QueueProvider::replying(&["first", "second"]));
    let state = AppState::new(provider.clone(), "sys");
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(chat_request(json!({"message": ""})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(chat_request(json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let calls = provider.calls.lock().await;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0][1].content, "");
    assert_eq!(calls[1][3].content, "");
}

#[tokio::test]
async fn daemon_chat_accepts_bodies_without_json_content_type() {
    let provider = Arc::new(QueueProvider::replying(&["first", "second", "third"]));
    let app = build_router(AppState::new(provider.clone(), "sys"));

    let bare = |body: &'static str| {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .body(Body::from(body))
            .unwrap()
    };

    let response = app
        .clone()
        .oneshot(bare(r#"{"message":"hello"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["reply"], json!("first"));

    let response = app.clone().oneshot(bare("")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(bare("message=hi")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["reply"], json!("third"));

    let calls = provider.calls.lock().await;
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0][1].content, "hello");
    assert_eq!(calls[1][3].content, "");
    assert_eq!(calls[2][5].content, "");
}

#[tokio::test]
async fn daemon_transcript_grows_by_two_per_exchange() {
    let provider = Arc::new(QueueProvider::replying(&["a", "b", "c", "d"]));
    let state = AppState::new(provider.clone(), "sys");
    let app = build_router(state.clone());

    for (n, message) in ["one", "two", "three", "four"].iter().enumerate() {
        let response = app
            .clone()
            .oneshot(chat_request(json!({"message": message})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.conversation.len().await, 1 + 2 * (n + 1));
    }

    let calls = provider.calls.lock().await;
    assert_eq!(calls.last().map(Vec::len), Some(8));
}

#[tokio::test]
async fn daemon_concurrent_exchanges_do_not_interleave() {
    let replies: Vec<String> = (0..10).map(|i| format!("reply {i}")).collect();
    let replies: Vec<&str> = replies.iter().map(String::as_str).collect();
    let state = AppState::new(Arc::new(QueueProvider::replying(&replies)), "sys");
    let app = build_router(state.clone());

    let mut handles = Vec::new();
    for i in 0..10 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            app.oneshot(chat_request(json!({"message": format!("msg {i}")})))
                .await
                .unwrap()
                .status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let transcript = state.conversation.transcript().await;
    assert_eq!(transcript.len(), 21);
    for pair in transcript[1..].chunks(2) {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[1].role, Role::Assistant);
    }
}
