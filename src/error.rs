//! Error types for chat-completion operations.
//!
//! Every failure surfaces as a [`ChatError`]. Nothing in this crate retries
//! or recovers: errors propagate to the caller, and the binaries let them
//! terminate the process.
//!
//! # Example
//!
//! ```rust
//! use glm_chat::{ChatError, ChatResult};
//!
//! fn first_line(text: &str) -> ChatResult<&str> {
//!     text.lines()
//!         .next()
//!         .ok_or_else(|| ChatError::response_parsing_error("empty reply"))
//! }
//! ```

use crate::logging::{log_error, log_warn};
use thiserror::Error;

/// Default back-off reported for a 429 without a usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER_SECONDS: u64 = 60;

/// High-level categorization of errors.
///
/// Informational only; the crate itself never acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller can fix it (missing key, bad credential, rejected payload).
    Client,
    /// The provider or the network had an issue.
    External,
    /// Rate limits and timeouts.
    Transient,
    /// Local I/O while writing the result.
    Internal,
}

/// Convenient result type for chat operations.
pub type ChatResult<T> = std::result::Result<T, ChatError>;

/// Errors that can occur while issuing a chat completion.
///
/// | Variant | Category | Retryable |
/// |---------|----------|-----------|
/// | `ConfigurationError` | Client | No |
/// | `RequestFailed` | External | Yes |
/// | `AuthenticationFailed` | Client | No |
/// | `RateLimitExceeded` | Transient | Yes |
/// | `Timeout` | Transient | Yes |
/// | `ApiError` (4xx) | Client | No |
/// | `ApiError` (5xx) | External | Yes |
/// | `ResponseParsingError` | External | No |
/// | `EmptyResponse` | External | No |
/// | `Io` | Internal | No |
#[derive(Error, Debug)]
pub enum ChatError {
    /// Client configuration is invalid or incomplete, e.g. no API key.
    #[error("Client configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP request never produced a response.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider rejected the credential.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Details from the provider.
        message: String,
    },

    /// The provider is throttling requests.
    #[error("Rate limit exceeded, retry after {retry_after_seconds}s")]
    RateLimitExceeded {
        /// Wait time suggested by the provider.
        retry_after_seconds: u64,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {timeout_seconds}s")]
    Timeout {
        /// The timeout that elapsed.
        timeout_seconds: u64,
    },

    /// The provider answered with a non-success status.
    #[error("AI provider error {status}: {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Provider error message, or the raw body.
        message: String,
    },

    /// The provider answered 2xx but the body could not be understood.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the parsing failure.
        message: String,
    },

    /// The response carried no choices.
    #[error("No choices returned from AI provider")]
    EmptyResponse,

    /// Writing the rendered response failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl ChatError {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::RequestFailed { .. } => ErrorCategory::External,
            Self::AuthenticationFailed { .. } => ErrorCategory::Client,
            Self::RateLimitExceeded { .. } => ErrorCategory::Transient,
            Self::Timeout { .. } => ErrorCategory::Transient,
            Self::ApiError { status, .. } if *status < 500 => ErrorCategory::Client,
            Self::ApiError { .. } => ErrorCategory::External,
            Self::ResponseParsingError { .. } => ErrorCategory::External,
            Self::EmptyResponse => ErrorCategory::External,
            Self::Io(_) => ErrorCategory::Internal,
        }
    }

    /// Whether a caller could reasonably try again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimitExceeded { .. } | Self::Timeout { .. } | Self::RequestFailed { .. } => {
                true
            }
            Self::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Chat client configuration invalid"
        );
        Self::ConfigurationError { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "Chat request execution failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "authentication_failed",
            message = %message,
            "AI provider authentication failed"
        );
        Self::AuthenticationFailed { message }
    }

    pub fn rate_limit_exceeded(retry_after_seconds: u64) -> Self {
        log_warn!(
            error_type = "rate_limit_exceeded",
            retry_after_seconds = retry_after_seconds,
            "AI provider rate limit exceeded"
        );
        Self::RateLimitExceeded {
            retry_after_seconds,
        }
    }

    pub fn timeout(timeout_seconds: u64) -> Self {
        log_warn!(
            error_type = "timeout",
            timeout_seconds = timeout_seconds,
            "Chat request timed out"
        );
        Self::Timeout { timeout_seconds }
    }

    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "api_error",
            status = status,
            message = %message,
            "AI provider returned an error status"
        );
        Self::ApiError { status, message }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing_error",
            message = %message,
            "AI provider response format invalid"
        );
        Self::ResponseParsingError { message }
    }

    pub fn empty_response() -> Self {
        log_warn!(
            error_type = "empty_response",
            "AI provider returned no choices"
        );
        Self::EmptyResponse
    }
}
