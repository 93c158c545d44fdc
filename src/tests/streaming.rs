// Unit Tests for Streamed Completions
//
// UNIT UNDER TEST: SseDecoder, StreamEvent, extract_text, collect_stream_text
//
// BUSINESS RESPONSIBILITY:
//   - Reassembles `data:` lines across arbitrary chunk boundaries
//   - Normalizes heterogeneous chunk payloads into text deltas
//   - Detects completion from [DONE], done flags and finish reasons
//
// TEST COVERAGE:
//   - Line buffering and non-data lines
//   - Delta, reasoning and answer fallbacks
//   - Aggregation up to the first done event

use crate::error::ChatError;
use crate::streaming::{collect_stream_text, extract_text, SseDecoder, StreamEvent};
use serde_json::json;

#[cfg(test)]
mod extract_text_tests {
    use super::*;

    #[test]
    fn test_extracts_from_every_supported_shape() {
        assert_eq!(extract_text(&json!("plain")), "plain");
        assert_eq!(extract_text(&json!(null)), "");
        assert_eq!(extract_text(&json!(42)), "");
        assert_eq!(extract_text(&json!(["a", { "text": "b" }])), "ab");
        assert_eq!(extract_text(&json!({ "value": "v" })), "v");
        assert_eq!(extract_text(&json!({ "reasoning_content": "r" })), "r");
        assert_eq!(
            extract_text(&json!({ "content": [{ "text": "x" }, { "content": "y" }] })),
            "xy"
        );
    }

    #[test]
    fn test_text_field_wins_over_content() {
        assert_eq!(extract_text(&json!({ "text": "t", "content": "c" })), "t");
    }
}

#[cfg(test)]
mod decoder_tests {
    use super::*;

    #[test]
    fn test_reassembles_line_split_across_chunks() {
        // Arrange
        let mut decoder = SseDecoder::new();

        // Act
        let first = decoder.push("data: {\"id\":\"a\",");
        let second = decoder.push("\"content\":\"hi\"}\n\ndata: [DONE]\n");

        // Assert
        assert!(first.is_empty(), "Incomplete line must be held back");
        assert_eq!(
            second,
            vec![r#"{"id":"a","content":"hi"}"#.to_string(), "[DONE]".to_string()]
        );
    }

    #[test]
    fn test_ignores_non_data_lines() {
        let mut decoder = SseDecoder::new();

        let payloads = decoder.push(": keep-alive\nevent: message\ndata: x\n");

        assert_eq!(payloads, vec!["x".to_string()]);
    }

    #[test]
    fn test_finish_flushes_unterminated_line() {
        let mut decoder = SseDecoder::new();
        decoder.push("data: [DONE]");

        assert_eq!(decoder.finish(), Some("[DONE]".to_string()));
        assert_eq!(decoder.finish(), None);
    }
}

#[cfg(test)]
mod event_tests {
    use super::*;

    #[test]
    fn test_done_marker() {
        let event = StreamEvent::from_payload("[DONE]").unwrap();

        assert!(event.done);
        assert!(event.delta.is_empty());
    }

    #[test]
    fn test_reasoning_delta_then_content_delta_then_stop() {
        // Arrange
        let reasoning = r#"{"id":"abc","choices":[{"index":0,"delta":{"role":"assistant","reasoning_content":"推理"}}]}"#;
        let content = r#"{"id":"abc","choices":[{"index":0,"delta":{"role":"assistant","content":"答复"}}]}"#;
        let stop = r#"{"id":"abc","choices":[{"index":0,"finish_reason":"stop","delta":{"role":"assistant","content":""}}]}"#;

        // Act
        let first = StreamEvent::from_payload(reasoning).unwrap();
        let second = StreamEvent::from_payload(content).unwrap();
        let third = StreamEvent::from_payload(stop).unwrap();

        // Assert
        assert_eq!(first.delta, "推理");
        assert!(!first.done);
        assert_eq!(second.delta, "答复");
        assert_eq!(second.id.as_deref(), Some("abc"));
        assert!(third.done);
        assert_eq!(third.finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn test_content_wins_over_reasoning() {
        let payload = r#"{"choices":[{"delta":{"content":"c","reasoning_content":"r"}}]}"#;

        assert_eq!(StreamEvent::from_payload(payload).unwrap().delta, "c");
    }

    #[test]
    fn test_top_level_answer_and_done_flag() {
        let event = StreamEvent::from_payload(r#"{"answer":"final","done":true}"#).unwrap();

        assert_eq!(event.delta, "final");
        assert!(event.done);
        assert!(event.finish_reason.is_none());
    }

    #[test]
    fn test_null_top_level_done_falls_back_to_delta_done() {
        let event =
            StreamEvent::from_payload(r#"{"done":null,"delta":{"done":true,"content":"x"}}"#)
                .unwrap();

        assert_eq!(event.delta, "x");
        assert!(event.done);
    }

    #[test]
    fn test_invalid_json_is_parsing_error() {
        let result = StreamEvent::from_payload("{not json");

        assert!(matches!(result, Err(ChatError::ResponseParsingError { .. })));
    }
}

#[cfg(test)]
mod collect_tests {
    use super::*;

    #[tokio::test]
    async fn test_aggregates_until_done() {
        // Arrange
        let events = vec![
            Ok(StreamEvent {
                delta: "Mem".to_string(),
                ..StreamEvent::default()
            }),
            Ok(StreamEvent {
                delta: "Filter".to_string(),
                ..StreamEvent::default()
            }),
            Ok(StreamEvent {
                done: true,
                finish_reason: Some("stop".to_string()),
                ..StreamEvent::default()
            }),
            Ok(StreamEvent {
                delta: "ignored".to_string(),
                ..StreamEvent::default()
            }),
        ];

        // Act
        let (text, reason) = collect_stream_text(futures_util::stream::iter(events))
            .await
            .unwrap();

        // Assert
        assert_eq!(text, "MemFilter");
        assert_eq!(reason.as_deref(), Some("stop"));
    }

    #[tokio::test]
    async fn test_propagates_stream_error() {
        let events = vec![
            Ok(StreamEvent::default()),
            Err(ChatError::response_parsing_error("bad chunk")),
        ];

        let result = collect_stream_text(futures_util::stream::iter(events)).await;

        assert!(result.is_err());
    }
}
