//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: The [`ApiTransport`] seam every request goes through
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront::core::service::ApiTransport;
//! use storefront::services::api::{mock::MockTransport, ApiClient};
//! use storefront::StorefrontConfig;
//!
//! // In production: the reqwest client
//! let config = StorefrontConfig::default();
//! let api: Arc<dyn ApiTransport> = Arc::new(ApiClient::new(&config));
//!
//! // In tests: a scripted transport
//! let api: Arc<dyn ApiTransport> = Arc::new(MockTransport::new());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::ApiTransport;
