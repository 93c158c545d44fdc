//! Test helper utilities for glm-chat integration tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use glm_chat::{ChatMessage, ChatRequest, ContentPart, ZhipuClient, ZhipuConfig};
use std::time::Duration;
use wiremock::ResponseTemplate;

pub const TEST_API_KEY: &str = "test-key";

/// Client pointed at a mock server with a short timeout.
pub fn create_test_client(base_url: String) -> ZhipuClient {
    let config = ZhipuConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        base_url,
        request_timeout: Some(Duration::from_secs(2)),
    };
    ZhipuClient::new(config).expect("test config is valid")
}

pub fn create_text_request() -> ChatRequest {
    ChatRequest::new(
        "glm-4.5",
        vec![
            ChatMessage::system("你是一个有用的AI助手。"),
            ChatMessage::user("你好，请介绍一下自己。"),
        ],
    )
    .with_temperature(0.6)
}

pub fn create_vision_request() -> ChatRequest {
    ChatRequest::new(
        "glm-4.5v",
        vec![ChatMessage::user_parts(vec![
            ContentPart::image_url("https://example.com/cat.jpg"),
            ContentPart::text("Where is the cat?"),
        ])],
    )
    .with_thinking(true)
}

pub fn success_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "20250101-abc",
        "created": 1_735_689_600,
        "model": "glm-4.5",
        "request_id": "20250101-abc",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 16, "completion_tokens": 8, "total_tokens": 24 }
    })
}

pub fn success_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(success_body(content))
}

/// Error envelope in the provider's format.
pub fn error_response(status: u16, code: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({
        "error": { "code": code, "message": message }
    }))
}

/// Server-sent-events body built from raw `data:` payloads.
pub fn sse_response(payloads: &[&str]) -> ResponseTemplate {
    let body: String = payloads
        .iter()
        .map(|p| format!("data: {p}\n\n"))
        .collect();
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(body)
}
