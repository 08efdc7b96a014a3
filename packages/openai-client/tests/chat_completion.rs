//! Chat-completion calls against an in-process stand-in for the API.

use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};
use serde_json::{json, Value};

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn request() -> ChatRequest {
    ChatRequest::new("gpt-test")
        .message(Message::system("system"))
        .message(Message::user("user"))
        .temperature(0.3)
        .max_tokens(500)
}

#[tokio::test]
async fn returns_first_choice_and_sends_bearer_token() {
    let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::new(Mutex::new(None));
    let captured = seen.clone();

    let router = Router::new().route(
        "/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let captured = captured.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                *captured.lock().unwrap() = Some((auth, body));
                Json(json!({
                    "choices": [
                        {"message": {"role": "assistant", "content": "first"}},
                        {"message": {"role": "assistant", "content": "second"}}
                    ],
                    "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
                }))
            }
        }),
    );
    let base = serve(router).await;

    let client = OpenAIClient::new("sk-test").with_base_url(base);
    let response = client.chat_completion(request()).await.unwrap();

    assert_eq!(response.content, "first");
    assert_eq!(response.usage.unwrap().total_tokens, 4);

    let (auth, body) = seen.lock().unwrap().take().unwrap();
    assert_eq!(auth, "Bearer sk-test");
    assert_eq!(body["model"], "gpt-test");
    assert_eq!(body["max_tokens"], 500);
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn non_success_status_carries_code_and_body() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::UNAUTHORIZED, "Incorrect API key provided") }),
    );
    let base = serve(router).await;

    let err = OpenAIClient::new("sk-bad")
        .with_base_url(base)
        .chat_completion(request())
        .await
        .unwrap_err();

    match err {
        OpenAIError::Api { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_choices_is_a_parse_error() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let base = serve(router).await;

    let err = OpenAIClient::new("sk-test")
        .with_base_url(base)
        .chat_completion(request())
        .await
        .unwrap_err();

    assert!(matches!(err, OpenAIError::Parse(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = OpenAIClient::new("sk-test")
        .with_base_url(format!("http://{}", addr))
        .chat_completion(request())
        .await
        .unwrap_err();

    assert!(matches!(err, OpenAIError::Network(_)));
    assert_eq!(err.status(), None);
}
