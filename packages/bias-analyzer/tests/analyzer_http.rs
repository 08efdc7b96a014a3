//! Analyzer against a local stand-in for the chat-completion endpoint.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use bias_analyzer::analyzer::prompts::EXAMPLE_RESPONSE;
use bias_analyzer::analyzer::{Analyzer, MAX_TOKENS};
use bias_analyzer::credentials::Credentials;
use bias_analyzer::AnalysisError;
use serde_json::{json, Value};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn reply_with(content: &'static str) -> Router {
    Router::new().route(
        "/chat/completions",
        post(move |Json(body): Json<Value>| async move {
            assert_eq!(body["max_tokens"], MAX_TOKENS);
            assert_eq!(body["messages"][0]["role"], "system");
            assert_eq!(body["messages"][1]["role"], "user");
            Json(json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            }))
        }),
    )
}

fn analyzer(base: &str) -> Analyzer {
    Analyzer::from_credentials(&Credentials::new("sk-test", "gpt-test"), Some(base))
}

#[tokio::test]
async fn parses_fenced_reply() {
    let fenced = Box::leak(format!("```json\n{}\n```", EXAMPLE_RESPONSE).into_boxed_str());
    let base = serve(reply_with(fenced)).await;

    let result = analyzer(&base).analyze_bias("Hello world").await.unwrap();

    assert_eq!(result.structure_analysis.paragraphs, 4);
    assert_eq!(result.political_bias, 0.0);
    assert!((result.credibility.trustworthy - 0.85).abs() < 1e-9);
}

#[tokio::test]
async fn non_success_status_carries_code_and_body() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "Rate limit reached") }),
    );
    let base = serve(router).await;

    let err = analyzer(&base).analyze_bias("Hello world").await.unwrap_err();

    match &err {
        AnalysisError::Transport { status, message } => {
            assert_eq!(*status, Some(429));
            assert_eq!(message, "Rate limit reached");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.to_string(), "OpenAI API error: 429 - Rate limit reached");
}

#[tokio::test]
async fn out_of_range_score_is_schema_error() {
    let base = serve(reply_with(
        r#"{"credibility": {"deceptive": 1.5, "fakeNews": 0, "trustworthy": 0, "objective": 0},
            "politicalBias": 0,
            "structureAnalysis": {"format": "Standard", "paragraphs": 1, "readability": "Low"}}"#,
    ))
    .await;

    let err = analyzer(&base).analyze_bias("Hello world").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Schema(_)));
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = analyzer(&base).analyze_bias("Hello world").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Transport { status: None, .. }));
    assert!(err.to_string().starts_with("Network error"));
}
