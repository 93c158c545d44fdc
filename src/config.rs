//! Client configuration for the Zhipu GLM open platform.

use crate::error::{ChatError, ChatResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Official endpoint root; `/chat/completions` is appended per request.
pub const DEFAULT_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";

/// Environment variable holding the bearer credential.
pub const API_KEY_ENV: &str = "AI_API_KEY";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "AI_BASE_URL";
/// Environment variable holding an optional per-request timeout in seconds.
pub const TIMEOUT_ENV: &str = "AI_TIMEOUT_SECS";

/// Zhipu-specific configuration
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ZhipuConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Applied to each request; `None` keeps reqwest's default (no timeout).
    pub request_timeout: Option<Duration>,
}

impl Default for ZhipuConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

// Hand-written so the credential never lands in logs.
impl fmt::Debug for ZhipuConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZhipuConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ZhipuConfig {
    /// Configuration with an explicit key and the default endpoint.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Load configuration from `AI_API_KEY`, `AI_BASE_URL` and `AI_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConfigurationError`] if:
    /// - `AI_API_KEY` is unset or blank
    /// - `AI_TIMEOUT_SECS` is set but not a whole number of seconds
    pub fn from_env() -> ChatResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());

        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    ChatError::configuration_error(format!(
                        "{TIMEOUT_ENV} must be a whole number of seconds: {e}"
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let config = Self {
            api_key,
            base_url,
            request_timeout,
        };

        log_debug!(
            provider = "zhipu",
            has_api_key = config.api_key.is_some(),
            base_url = %config.base_url,
            timeout_secs = config.request_timeout.map(|t| t.as_secs()),
            "Loaded client configuration from environment"
        );

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration is complete.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConfigurationError`] if the API key is missing
    /// or the base URL is empty.
    pub fn validate(&self) -> ChatResult<()> {
        if self.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(ChatError::configuration_error(format!(
                "AI configuration is missing. Please provide {API_KEY_ENV}"
            )));
        }
        if self.normalized_base_url().is_empty() {
            return Err(ChatError::configuration_error("AI base URL is empty"));
        }
        Ok(())
    }

    /// Base URL with trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.normalized_base_url())
    }
}
