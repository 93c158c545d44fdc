// Test helper utilities shared by the unit test modules.
//
// IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::error::{ChatError, ChatResult};
use crate::messages::{ChatMessage, ContentPart};
use crate::request::ChatRequest;
use crate::response::ChatResponse;
use crate::transport::ChatTransport;
use std::sync::Mutex;

/// Response JSON with a single text choice.
pub fn text_response_json(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "created": 1_735_689_600,
        "model": "glm-4.5",
        "request_id": "req-test",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 12,
            "completion_tokens": 7,
            "total_tokens": 19
        }
    })
}

pub fn text_response(content: &str) -> ChatResponse {
    serde_json::from_value(text_response_json(content)).unwrap()
}

/// The two-turn text request of the text-only pattern.
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

/// One user turn holding an image part followed by a text part.
pub fn create_vision_request() -> ChatRequest {
    ChatRequest::new(
        "glm-4.5v",
        vec![ChatMessage::user_parts(vec![
            ContentPart::image_url("https://example.com/cat.jpg"),
            ContentPart::text("Where is the cat? Answer with [x1,y1,x2,y2]."),
        ])],
    )
    .with_thinking(true)
}

/// Transport that records every request and replies from a fixed script.
pub struct RecordingTransport {
    reply: Box<dyn Fn() -> ChatResult<ChatResponse> + Send + Sync>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl RecordingTransport {
    pub fn replying(content: &str) -> Self {
        let response = text_response(content);
        Self {
            reply: Box::new(move || Ok(response.clone())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &'static str) -> Self {
        Self {
            reply: Box::new(move || Err(ChatError::request_failed(message, None))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ChatTransport for RecordingTransport {
    async fn send(&self, request: &ChatRequest) -> ChatResult<ChatResponse> {
        self.requests.lock().unwrap().push(request.clone());
        (self.reply)()
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}
