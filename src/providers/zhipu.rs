//! Zhipu GLM provider implementation
//!
//! Talks to the OpenAI-compatible `chat/completions` endpoint of the
//! Zhipu open platform with a bearer credential.

use crate::config::ZhipuConfig;
use crate::error::{ChatError, ChatResult, DEFAULT_RETRY_AFTER_SECONDS};
use crate::logging::{log_debug, log_error};
use crate::request::ChatRequest;
use crate::response::ChatResponse;
use crate::streaming::{SseDecoder, StreamEvent};
use crate::transport::ChatTransport;
use futures_util::{Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::{Duration, Instant};

const PROVIDER: &str = "zhipu";

/// Zhipu provider implementation
#[derive(Debug)]
pub struct ZhipuClient {
    client: reqwest::Client,
    headers: HeaderMap,
    config: ZhipuConfig,
}

impl ZhipuClient {
    /// Create a new client instance
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConfigurationError`] if:
    /// - API key is missing
    /// - API key cannot be sent as a header value
    /// - HTTP client initialization fails
    pub fn new(config: ZhipuConfig) -> ChatResult<Self> {
        log_debug!(
            provider = PROVIDER,
            has_api_key = config.api_key.is_some(),
            base_url = %config.normalized_base_url(),
            "Creating Zhipu client"
        );

        config.validate()?;
        let headers = Self::build_auth_headers(config.api_key.as_deref().unwrap_or_default())?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            ChatError::configuration_error(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            headers,
            config,
        })
    }

    /// Create a client from `AI_API_KEY` / `AI_BASE_URL` / `AI_TIMEOUT_SECS`.
    pub fn from_env() -> ChatResult<Self> {
        Self::new(ZhipuConfig::from_env()?)
    }

    pub fn config(&self) -> &ZhipuConfig {
        &self.config
    }

    /// Build the authentication headers for the endpoint
    pub fn build_auth_headers(api_key: &str) -> ChatResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            ChatError::configuration_error(format!("Invalid API key format: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        Ok(headers)
    }

    /// Send the request once and return the raw HTTP response on success.
    async fn post(&self, request: &ChatRequest) -> ChatResult<reqwest::Response> {
        let url = self.config.completions_url();

        log_debug!(
            provider = PROVIDER,
            url = %url,
            model = %request.model,
            message_count = request.messages.len(),
            stream = request.stream.unwrap_or(false),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&url, e))?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        Ok(response)
    }

    fn map_transport_error(&self, url: &str, error: reqwest::Error) -> ChatError {
        log_error!(
            provider = PROVIDER,
            url = %url,
            error = %error,
            "HTTP request failed"
        );
        if error.is_timeout() {
            return ChatError::timeout(timeout_seconds(self.config.request_timeout));
        }
        ChatError::request_failed(format!("Request failed: {error}"), Some(Box::new(error)))
    }

    /// Stream a completion as normalized events.
    ///
    /// The request is sent with `stream: true` regardless of its own setting.
    /// Errors while reading the body are yielded as stream items.
    pub async fn stream(
        &self,
        request: &ChatRequest,
    ) -> ChatResult<impl Stream<Item = ChatResult<StreamEvent>>> {
        let request = request.clone().with_stream(true);
        let response = self.post(&request).await?;

        let mut decoder = SseDecoder::new();
        let body = response.bytes_stream();

        let events = body
            .map(Some)
            .chain(futures_util::stream::once(async { None }))
            .flat_map(move |chunk| {
                let payloads: Vec<ChatResult<String>> = match chunk {
                    Some(Ok(bytes)) => decoder
                        .push(&bytes)
                        .into_iter()
                        .map(Ok)
                        .collect(),
                    Some(Err(e)) => vec![Err(ChatError::request_failed(
                        format!("Stream read failed: {e}"),
                        Some(Box::new(e)),
                    ))],
                    None => decoder.finish().into_iter().map(Ok).collect(),
                };
                futures_util::stream::iter(payloads)
            })
            .map(|payload| payload.and_then(|p| StreamEvent::from_payload(&p)));

        Ok(events)
    }
}

#[async_trait::async_trait]
impl ChatTransport for ZhipuClient {
    async fn send(&self, request: &ChatRequest) -> ChatResult<ChatResponse> {
        let start_time = Instant::now();
        let response = self.post(request).await?;
        let parsed = parse_success_response(response).await?;

        log_debug!(
            provider = PROVIDER,
            model = %request.model,
            duration_ms = start_time.elapsed().as_millis() as u64,
            choices = parsed.choices.len(),
            total_tokens = parsed.usage.map(|u| u.total_tokens),
            "Chat completion received"
        );

        Ok(parsed)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Whole seconds of the configured timeout, rounded up so that a
/// sub-second timeout never reads as zero.
fn timeout_seconds(timeout: Option<Duration>) -> u64 {
    timeout.map_or(0, |t| {
        let secs = t.as_secs();
        if t.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    })
}

/// Map a non-success HTTP response to an error
async fn handle_error_response(response: reqwest::Response) -> ChatError {
    let status = response.status();
    let headers = response.headers().clone();
    let error_text = response.text().await.unwrap_or_default();

    log_error!(
        provider = PROVIDER,
        status = %status,
        error_text = %error_text,
        "API error response"
    );

    match status.as_u16() {
        401 => ChatError::authentication_failed(
            provider_error_message(&error_text)
                .unwrap_or_else(|| "Invalid API key or authentication failed".to_string()),
        ),
        429 => {
            let retry_after_seconds = headers
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECONDS);

            ChatError::rate_limit_exceeded(retry_after_seconds)
        }
        code => {
            let message = provider_error_message(&error_text).unwrap_or_else(|| {
                if error_text.trim().is_empty() {
                    "AI provider request failed".to_string()
                } else {
                    error_text
                }
            });
            ChatError::api_error(code, message)
        }
    }
}

/// Pull `error.message` out of the provider's JSON error envelope.
fn provider_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.pointer("/error/message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Parse a successful HTTP response into a ChatResponse
async fn parse_success_response(response: reqwest::Response) -> ChatResult<ChatResponse> {
    let raw_body = response.text().await.map_err(|e| {
        log_error!(provider = PROVIDER, error = %e, "Failed to read response body");
        ChatError::response_parsing_error(format!("Failed to read response: {e}"))
    })?;

    serde_json::from_str(&raw_body).map_err(|e| {
        log_error!(
            provider = PROVIDER,
            error = %e,
            raw_body = %raw_body,
            "Failed to parse response"
        );
        ChatError::response_parsing_error(format!("Invalid response: {e}"))
    })
}
