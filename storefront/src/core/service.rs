//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.

use crate::services::api::request::{ApiRequest, RawResponse};
use async_trait::async_trait;

/// Executes one HTTP exchange against the storefront API.
///
/// Implementations return `Err` only when no response was received at all;
/// every HTTP status, including 4xx and 5xx, is an `Ok(RawResponse)`.
/// Classification of the body is the caller's job.
///
/// In production this is [`crate::services::api::ApiClient`]; tests use
/// [`crate::services::api::mock::MockTransport`].
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, String>;
}
