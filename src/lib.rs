//! # glm-chat
//!
//! Minimal chat-completion client for the Zhipu GLM open platform.
//!
//! ## Key Features
//!
//! - **Single round trip**: one request, one response, no hidden retries
//! - **Swappable transport**: the issuer only needs a [`ChatTransport`]
//! - **Multimodal messages**: text and `image_url` parts, order preserved
//! - **Streaming**: server-sent events normalized into [`StreamEvent`]s
//!
//! ## Example
//!
//! ```rust,no_run
//! use glm_chat::{ChatMessage, ChatRequest, Output, RequestIssuer, ZhipuClient, ZhipuConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ZhipuClient::new(ZhipuConfig::with_api_key("your-api-key"))?;
//! let issuer = RequestIssuer::new(client);
//!
//! let request = ChatRequest::new(
//!     "glm-4.5",
//!     vec![
//!         ChatMessage::system("You are a helpful assistant."),
//!         ChatMessage::user("Hello, who are you?"),
//!     ],
//! )
//! .with_temperature(0.6);
//!
//! issuer
//!     .issue_and_print(&request, Output::Content, &mut std::io::stdout())
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod logging;

pub mod config;
pub mod error;
pub mod grounding;
pub mod issuer;
pub mod messages;
pub mod providers;
pub mod request;
pub mod response;
pub mod streaming;
pub mod transport;

#[cfg(test)]
pub mod tests;

pub use config::ZhipuConfig;
pub use error::{ChatError, ChatResult, ErrorCategory};
pub use grounding::{parse_boxes, BoundingBox};
pub use issuer::{render, Output, RequestIssuer};
pub use messages::{ChatMessage, ContentPart, ImageUrl, MessageContent, Role};
pub use providers::ZhipuClient;
pub use request::{ChatRequest, Thinking, ThinkingMode};
pub use response::{ChatResponse, Choice, ResponseMessage, Usage};
pub use streaming::{collect_stream_text, extract_text, SseDecoder, StreamEvent};
pub use transport::ChatTransport;
