//! Wire-level tests for the Anthropic client against a mock HTTP server.

use duncall::dialogue::Turn;
use duncall::error::ProviderError;
use duncall::providers::{AnthropicClient, CompletionClient, GenerationParams};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "claude-3-5-sonnet-latest";

fn params() -> GenerationParams {
    GenerationParams {
        max_tokens: 150,
        temperature: 0.2,
    }
}

fn client_for(server: &MockServer) -> AnthropicClient {
    AnthropicClient::with_base_url(Some("sk-ant-test"), MODEL, Some(&server.uri()))
}

#[tokio::test]
async fn complete_returns_the_text_block() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "Good morning Sir."}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client
        .complete("instruction", &[Turn::user("hello")], params())
        .await
        .unwrap();

    assert_eq!(reply, "Good morning Sir.");
}

#[tokio::test]
async fn request_body_carries_model_system_and_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(json!({
            "model": MODEL,
            "max_tokens": 150,
            "system": "You are a verification agent.",
            "temperature": 0.2,
            "messages": [
                {"role": "user", "content": "hello"},
                {"role": "assistant", "content": "hi"},
                {"role": "user", "content": "1234"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "TRANSFER_TO_DISCUSSION"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let turns = vec![Turn::user("hello"), Turn::assistant("hi"), Turn::user("1234")];
    let reply = client
        .complete("You are a verification agent.", &turns, params())
        .await
        .unwrap();

    assert_eq!(reply, "TRANSFER_TO_DISCUSSION");
}

#[tokio::test]
async fn rate_limit_maps_to_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limit exceeded"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .complete("instruction", &[Turn::user("hi")], params())
        .await;

    match result {
        Err(ProviderError::RateLimited(message)) => {
            assert!(message.contains("rate limit exceeded"));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn auth_failure_maps_to_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid x-api-key"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .complete("instruction", &[Turn::user("hi")], params())
        .await;

    assert!(matches!(result, Err(ProviderError::Auth(_))));
}

#[tokio::test]
async fn server_error_bodies_are_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(5000)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .complete("instruction", &[Turn::user("hi")], params())
        .await;

    match result {
        Err(ProviderError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.len() < 300, "body was not truncated: {} chars", message.len());
            assert!(message.ends_with("..."));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_content_maps_to_empty_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .complete("instruction", &[Turn::user("hi")], params())
        .await;

    assert!(matches!(result, Err(ProviderError::EmptyResponse)));
}
