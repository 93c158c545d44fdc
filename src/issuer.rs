//! The request issuer: one request in, one printed field out.

use crate::error::{ChatError, ChatResult};
use crate::logging::{log_debug, log_info};
use crate::request::ChatRequest;
use crate::response::ChatResponse;
use crate::transport::ChatTransport;
use std::io::Write;
use std::time::Instant;

/// Which part of the response gets written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// `choices[0].message.content` as text.
    #[default]
    Content,
    /// The whole `choices[0].message` object as pretty JSON.
    Message,
}

/// Issues single chat requests through a [`ChatTransport`].
///
/// Holds no state besides the transport, so repeated calls are independent.
#[derive(Debug)]
pub struct RequestIssuer<T> {
    transport: T,
}

impl<T: ChatTransport> RequestIssuer<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` exactly once and hand back the provider's response.
    ///
    /// Errors from the transport are returned as-is; there is no retry.
    pub async fn issue(&self, request: &ChatRequest) -> ChatResult<ChatResponse> {
        let start_time = Instant::now();
        log_debug!(
            provider = self.transport.provider_name(),
            model = %request.model,
            message_count = request.messages.len(),
            temperature = request.temperature,
            thinking = request.thinking.is_some(),
            "Issuing chat request"
        );

        let response = self.transport.send(request).await?;

        log_info!(
            provider = self.transport.provider_name(),
            model = %request.model,
            response_id = %response.id_or_generate(),
            created_at = ?response.created_at(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            finish_reason = response.finish_reason().unwrap_or("none"),
            "Chat request completed"
        );
        Ok(response)
    }

    /// Issue `request` and write the selected field, newline-terminated.
    ///
    /// Nothing is written unless the call succeeds and the field exists.
    pub async fn issue_and_print<W: Write>(
        &self,
        request: &ChatRequest,
        output: Output,
        out: &mut W,
    ) -> ChatResult<ChatResponse> {
        let response = self.issue(request).await?;
        let rendered = render(&response, output)?;
        writeln!(out, "{rendered}")?;
        out.flush()?;
        Ok(response)
    }
}

/// Render one field of `response` as it would be printed.
pub fn render(response: &ChatResponse, output: Output) -> ChatResult<String> {
    match output {
        Output::Content => response.content_text(),
        Output::Message => {
            let message = response.first_message()?;
            serde_json::to_string_pretty(message).map_err(|e| {
                ChatError::response_parsing_error(format!("Failed to encode message: {e}"))
            })
        }
    }
}
