//! Chat-completion response body.
//!
//! Only the fields the issuer reads are modeled. Unmodeled fields of the
//! top-level body are ignored, while a message keeps everything it carried.

use crate::error::{ChatError, ChatResult};
use crate::streaming::extract_text;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Chat completion response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    /// Unix timestamp in seconds.
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Choice in a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message in a response choice
///
/// `content` is kept as raw JSON: text models answer with a string, but
/// null and part lists also occur. Fields without a typed counterpart,
/// such as `tool_calls`, land in `extra` and serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl ResponseMessage {
    /// Content rendered as text.
    ///
    /// Strings come back verbatim. Other shapes are flattened to their text
    /// segments, falling back to the JSON encoding when they carry none.
    pub fn content_text(&self) -> String {
        match &self.content {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => {
                let text = extract_text(other);
                if text.is_empty() {
                    other.to_string()
                } else {
                    text
                }
            }
        }
    }
}

impl ChatResponse {
    /// The first choice, the only one the issuer reads.
    pub fn first_choice(&self) -> ChatResult<&Choice> {
        self.choices.first().ok_or_else(ChatError::empty_response)
    }

    /// `choices[0].message`
    pub fn first_message(&self) -> ChatResult<&ResponseMessage> {
        self.first_choice().map(|choice| &choice.message)
    }

    /// `choices[0].message.content` as text.
    pub fn content_text(&self) -> ChatResult<String> {
        self.first_message().map(ResponseMessage::content_text)
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first()?.finish_reason.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }

    /// Provider id, or a fresh random one when the provider sent none.
    pub fn id_or_generate(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }
}
