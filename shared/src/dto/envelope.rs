//! # Response Envelope
//!
//! Every storefront endpoint answers with the same top-level shape:
//!
//! ```text
//! {
//!   "success": true,
//!   "message": "Product quantity increased.",
//!   "redirect": "/payment.html",        (optional)
//!   "errors": ["Row 3: ..."],           (optional)
//!   "new_quantity": 3                   (endpoint payload, flattened)
//! }
//! ```
//!
//! The endpoint-specific payload keys sit beside the envelope keys rather than
//! under a nested object, so [`Envelope`] flattens its payload type `T`.
//! Payload types must be `Default` with every field optional or defaulted, so
//! that `success=false` envelopes (which usually omit the payload) still parse.

use serde::{Deserialize, Serialize};

/// Uniform JSON response envelope.
///
/// `success=true` means the server already committed the side effect;
/// `success=false` means nothing happened server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T = NoPayload> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Default> Envelope<T> {
    /// Successful envelope with a default payload.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            redirect: None,
            errors: Vec::new(),
            data: T::default(),
        }
    }

    /// Failed envelope with a default payload.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            redirect: None,
            errors: Vec::new(),
            data: T::default(),
        }
    }
}

impl<T> Envelope<T> {
    pub fn with_data(mut self, data: T) -> Self {
        self.data = data;
        self
    }

    pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

/// Payload for endpoints that carry nothing beyond the envelope keys.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoPayload {}

/// Body of a non-2xx response.
///
/// The storefront API answers errors with an envelope (`message`); proxies
/// and framework error pages sometimes answer with `{"error": "..."}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn text(&self) -> Option<&str> {
        let non_empty = |m: &&str| !m.is_empty();
        self.message
            .as_deref()
            .filter(non_empty)
            .or(self.error.as_deref().filter(non_empty))
    }
}
