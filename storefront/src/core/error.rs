//! # Common Error Types
//!
//! Consolidated error handling for the storefront client.
//!
//! Every controller operation returns [`Result<T>`]. Errors are categorized by
//! where the exchange broke down:
//!
//! - **Transport**: the request never produced a response (DNS, refused, reset)
//! - **Http**: the server answered with a non-2xx status
//! - **InvalidResponse**: a 2xx answer whose body is not an envelope
//! - **Rejected**: a well-formed envelope with `success=false`
//! - **Validation**: a local check failed before any request was issued
//! - **NotAuthenticated**: a gated action was attempted while logged out
//! - **State**: an operation arrived in the wrong controller state
//!
//! ## Usage Pattern
//!
//! ```rust
//! use storefront::core::error::{AppError, Result};
//!
//! fn validate_quantity(quantity: u32) -> Result<u32> {
//!     if quantity == 0 {
//!         return Err(AppError::Validation("Quantity must be positive".to_string()));
//!     }
//!     Ok(quantity)
//! }
//! ```

use thiserror::Error;

/// Application-wide error type covering all failures a controller can surface.
///
/// # Example
///
/// ```rust
/// use storefront::core::error::AppError;
///
/// let err = AppError::Rejected { message: "Out of stock".to_string(), errors: vec![] };
/// assert_eq!(err.to_string(), "Request rejected: Out of stock");
/// assert_eq!(err.server_message(), Some("Out of stock"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    /// The request failed before a response arrived. Never retried.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx response.
    ///
    /// `message` carries the `message`/`error` key when the body was JSON;
    /// `body` carries the raw text when it was not.
    #[error("HTTP error {status}: {}", http_detail(.message, .body))]
    Http {
        status: u16,
        message: Option<String>,
        body: Option<String>,
    },

    /// A 2xx body that does not parse as an envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The server answered `success=false`; nothing was committed.
    #[error("Request rejected: {message}")]
    Rejected { message: String, errors: Vec<String> },

    /// Local input validation failure, detected before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Gated action attempted without a session.
    #[error("Not logged in: {0}")]
    NotAuthenticated(String),

    /// Operation does not apply to the current controller state.
    #[error("State error: {0}")]
    State(String),
}

impl AppError {
    /// Human-readable message the server attached to its answer, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Rejected { message, .. } if !message.is_empty() => Some(message),
            AppError::Http {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Per-row errors attached to a rejected envelope.
    pub fn row_errors(&self) -> &[String] {
        match self {
            AppError::Rejected { errors, .. } => errors,
            _ => &[],
        }
    }

    /// True when the request never reached the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport(_))
    }

    /// True when the server answered and its answer could be read: a
    /// `success=false` envelope or an error status with a JSON body.
    pub fn is_server_verdict(&self) -> bool {
        matches!(
            self,
            AppError::Rejected { .. } | AppError::Http { body: None, .. }
        )
    }
}

fn http_detail<'a>(message: &'a Option<String>, body: &'a Option<String>) -> &'a str {
    message
        .as_deref()
        .or(body.as_deref())
        .unwrap_or("no details")
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;
