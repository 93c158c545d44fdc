//! The seam between the request issuer and the remote provider.

use crate::error::ChatResult;
use crate::request::ChatRequest;
use crate::response::ChatResponse;

/// Anything that can carry one chat request to a model and bring back its
/// response.
///
/// Implementations own their credential and endpoint. They must return the
/// provider's response unmodified and must not retry on their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    /// Perform exactly one request/response round trip.
    async fn send(&self, request: &ChatRequest) -> ChatResult<ChatResponse>;

    /// Get provider name for logging and debugging
    fn provider_name(&self) -> &'static str;
}

#[async_trait::async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for std::sync::Arc<T> {
    async fn send(&self, request: &ChatRequest) -> ChatResult<ChatResponse> {
        (**self).send(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
