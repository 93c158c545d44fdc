//! Server-sent-events decoding for streamed completions.
//!
//! The endpoint streams `data: {json}` lines terminated by `data: [DONE]`.
//! Chunk payloads vary between models (delta content, reasoning content,
//! whole messages), so text is pulled out leniently.

use crate::error::{ChatError, ChatResult};
use crate::logging::log_trace;
use futures_util::{Stream, StreamExt};
use serde_json::Value;

/// Flatten any JSON shape the provider uses for content into plain text.
///
/// Strings are returned as-is and arrays are concatenated. Objects yield
/// their first string `text`, `content`, `value` or `reasoning_content`
/// field, or recurse into an array `content`.
pub fn extract_text(source: &Value) -> String {
    match source {
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(extract_text).collect(),
        Value::Object(map) => {
            for key in ["text", "content", "value", "reasoning_content"] {
                if let Some(Value::String(text)) = map.get(key) {
                    return text.clone();
                }
            }
            match map.get("content") {
                Some(content @ Value::Array(_)) => extract_text(content),
                _ => String::new(),
            }
        }
        _ => String::new(),
    }
}

/// One decoded `data:` payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamEvent {
    pub id: Option<String>,
    /// Text carried by this chunk, possibly empty.
    pub delta: String,
    pub done: bool,
    pub finish_reason: Option<String>,
}

impl StreamEvent {
    /// Normalize a single `data:` payload.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ResponseParsingError`] if the payload is not JSON.
    pub fn from_payload(payload: &str) -> ChatResult<Self> {
        let payload = payload.trim();
        if payload.is_empty() || payload == "[DONE]" {
            return Ok(Self {
                done: true,
                ..Self::default()
            });
        }

        let parsed: Value = serde_json::from_str(payload).map_err(|e| {
            ChatError::response_parsing_error(format!("Invalid stream chunk: {e}"))
        })?;

        let choice = parsed
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first());
        let delta = choice
            .and_then(|c| c.get("delta"))
            .or_else(|| parsed.get("delta"));

        let candidates = [
            delta.and_then(|d| d.get("content")),
            choice.and_then(|c| c.pointer("/message/content")),
            parsed.get("content"),
            delta.and_then(|d| d.get("reasoning_content")),
        ];
        let mut text = candidates
            .into_iter()
            .flatten()
            .map(extract_text)
            .find(|t| !t.is_empty())
            .unwrap_or_default();
        if text.is_empty() {
            if let Some(Value::String(answer)) = parsed.get("answer") {
                text = answer.clone();
            }
        }

        let finish_reason = choice
            .and_then(|c| c.get("finish_reason"))
            .filter(|v| !v.is_null())
            .or_else(|| parsed.get("finish_reason").filter(|v| !v.is_null()))
            .map(|v| match v {
                Value::String(reason) => reason.clone(),
                other => other.to_string(),
            });

        let done_flag = parsed
            .get("done")
            .filter(|v| !v.is_null())
            .or_else(|| delta.and_then(|d| d.get("done")))
            .map(is_truthy)
            .unwrap_or(false);

        Ok(Self {
            id: parsed.get("id").and_then(Value::as_str).map(str::to_string),
            delta: text,
            done: done_flag || finish_reason.is_some(),
            finish_reason,
        })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Incremental decoder turning raw body bytes into `data:` payloads.
///
/// Bytes are buffered until a full line is available, so lines (and
/// multi-byte characters) split across network chunks come out whole.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return the payloads of every completed `data:` line.
    pub fn push(&mut self, chunk: impl AsRef<[u8]>) -> Vec<String> {
        self.buffer.extend_from_slice(chunk.as_ref());
        let mut payloads = Vec::new();

        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            if let Some(payload) = Self::data_payload(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Flush a trailing line that arrived without a newline.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        Self::data_payload(&rest)
    }

    fn data_payload(line: &[u8]) -> Option<String> {
        let line = String::from_utf8_lossy(line);
        let payload = line.trim().strip_prefix("data:")?;
        log_trace!(payload_len = payload.len(), "Decoded SSE data line");
        Some(payload.trim().to_string())
    }
}

/// Concatenate the deltas of a stream until the first done event.
///
/// Returns the aggregated text and the finish reason, if any was sent.
///
/// # Errors
///
/// Propagates the first error yielded by the stream.
pub async fn collect_stream_text<S>(stream: S) -> ChatResult<(String, Option<String>)>
where
    S: Stream<Item = ChatResult<StreamEvent>>,
{
    futures_util::pin_mut!(stream);
    let mut aggregated = String::new();

    while let Some(event) = stream.next().await {
        let event = event?;
        aggregated.push_str(&event.delta);
        if event.done {
            return Ok((aggregated, event.finish_reason));
        }
    }

    Ok((aggregated, None))
}
