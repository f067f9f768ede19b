//! # Request/Response Exchange
//!
//! Every call goes through [`RequestClient`]:
//!
//! - [`RequestClient::exchange`] issues the request and classifies the
//!   answer into `Ok(Envelope<T>)` or an [`AppError`], with no UI side effects.
//! - [`RequestClient::submit`] wraps `exchange` in the standard form flow:
//!   spinner, outcome on overlay then message slot, delayed redirect or form
//!   reset on success.
//!
//! ## Classification
//!
//! ```text
//! transport error           -> AppError::Transport
//! non-2xx                   -> AppError::Http { message from JSON body, or raw body }
//! 2xx, not an envelope      -> AppError::InvalidResponse
//! 2xx, success=false        -> AppError::Rejected
//! 2xx, success=true         -> Ok(Envelope<T>)
//! ```

use super::request::{ApiRequest, RawResponse};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiTransport;
use crate::debug::ActionTrace;
use crate::ui::{BoundForm, MessageKind, Navigator, UiState};
use serde::de::DeserializeOwned;
use shared::{Envelope, ErrorResponse};
use std::sync::Arc;
use std::time::Duration;

pub const BUSY_TEXT: &str = "Processing...";
pub const NETWORK_ERROR_OVERLAY: &str = "A network error occurred.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "A network error occurred. Please check your internet connection and server status.";
pub const UNEXPECTED_SERVER_ERROR: &str = "An unexpected server error occurred.";
pub const INVALID_RESPONSE_OVERLAY: &str = "Received invalid response.";
pub const INVALID_RESPONSE_MESSAGE: &str =
    "Received invalid response from server. Check logs for details.";

const ERROR_SNIPPET_CHARS: usize = 100;

/// How [`RequestClient::submit`] reports and follows up on one request.
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    pub message_target: String,
    pub busy_text: String,
    /// Navigate here on success unless the server names its own redirect.
    pub redirect: Option<String>,
    /// Overrides the configured redirect delay.
    pub redirect_delay: Option<Duration>,
    /// Cleared on success when no redirect follows.
    pub form: Option<BoundForm>,
}

impl SubmitOptions {
    pub fn new(message_target: &str) -> Self {
        Self {
            message_target: message_target.to_string(),
            busy_text: BUSY_TEXT.to_string(),
            redirect: None,
            redirect_delay: None,
            form: None,
        }
    }

    pub fn busy_text(mut self, text: &str) -> Self {
        self.busy_text = text.to_string();
        self
    }

    pub fn redirect(mut self, target: &str) -> Self {
        self.redirect = Some(target.to_string());
        self
    }

    pub fn redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = Some(delay);
        self
    }

    pub fn clearing(mut self, form: &BoundForm) -> Self {
        self.form = Some(form.clone());
        self
    }
}

/// Overlay and message wording for a failed submission.
pub fn failure_text(error: &AppError) -> (String, String) {
    match error {
        AppError::Transport(_) => (
            NETWORK_ERROR_OVERLAY.to_string(),
            NETWORK_ERROR_MESSAGE.to_string(),
        ),
        AppError::Http {
            status,
            body: Some(body),
            message: None,
        } => {
            let snippet: String = body.chars().take(ERROR_SNIPPET_CHARS).collect();
            (
                format!("Server error ({})", status),
                format!("Server error ({}): {}...", status, snippet),
            )
        }
        AppError::Http { message, .. } => {
            let text = message.as_deref().unwrap_or(UNEXPECTED_SERVER_ERROR);
            (text.to_string(), format!("Error: {}", text))
        }
        AppError::InvalidResponse(_) => (
            INVALID_RESPONSE_OVERLAY.to_string(),
            INVALID_RESPONSE_MESSAGE.to_string(),
        ),
        AppError::Rejected { message, .. } => (message.clone(), message.clone()),
        AppError::Validation(message)
        | AppError::NotAuthenticated(message)
        | AppError::State(message) => (message.clone(), message.clone()),
    }
}

/// Classify a completed exchange.
pub fn classify<T: DeserializeOwned>(raw: RawResponse) -> Result<Envelope<T>> {
    if !raw.is_success() {
        return Err(match serde_json::from_str::<ErrorResponse>(&raw.body) {
            Ok(error) => AppError::Http {
                status: raw.status,
                message: error.text().map(str::to_string),
                body: None,
            },
            Err(_) => AppError::Http {
                status: raw.status,
                message: None,
                body: Some(raw.body),
            },
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(&raw.body)
        .map_err(|e| AppError::InvalidResponse(e.to_string()))?;

    if envelope.success {
        Ok(envelope)
    } else {
        Err(AppError::Rejected {
            message: envelope.message,
            errors: envelope.errors,
        })
    }
}

#[derive(Clone)]
pub struct RequestClient {
    transport: Arc<dyn ApiTransport>,
    ui: UiState,
    navigator: Navigator,
}

impl RequestClient {
    pub fn new(transport: Arc<dyn ApiTransport>, ui: UiState, navigator: Navigator) -> Self {
        Self {
            transport,
            ui,
            navigator,
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Issue `request` and classify the answer. No UI side effects.
    pub async fn exchange<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Envelope<T>> {
        let method = request.method;
        let path = request.path.clone();

        let raw = self.transport.send(request).await.map_err(|e| {
            tracing::error!(%method, path = %path, error = %e, "Request failed");
            AppError::Transport(e)
        })?;
        let status = raw.status;

        let result = classify(raw);
        match &result {
            Ok(_) => {
                tracing::info!(%method, path = %path, status, "Request succeeded");
            }
            Err(e) => {
                tracing::warn!(%method, path = %path, status, error = %e, "Request did not succeed");
            }
        }
        result
    }

    /// Issue `request` and decode a body that is not an envelope.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let path = request.path.clone();
        let raw = self
            .transport
            .send(request)
            .await
            .map_err(AppError::Transport)?;
        if !raw.is_success() {
            return Err(AppError::Http {
                status: raw.status,
                message: None,
                body: Some(raw.body),
            });
        }
        serde_json::from_str(&raw.body).map_err(|e| {
            tracing::warn!(path = %path, error = %e, "Unparseable response");
            AppError::InvalidResponse(e.to_string())
        })
    }

    /// Standard form submission flow.
    pub async fn submit<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        options: SubmitOptions,
    ) -> Result<Envelope<T>> {
        ActionTrace::new()
            .run(self.submit_in_action(request, options))
            .await
    }

    async fn submit_in_action<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        options: SubmitOptions,
    ) -> Result<Envelope<T>> {
        let target = options.message_target.as_str();
        tracing::info!(path = %request.path, target, "Submitting form");
        self.ui.busy(&options.busy_text, target);

        match self.exchange::<T>(request).await {
            Ok(envelope) => {
                self.ui.report(MessageKind::Success, &envelope.message, &envelope.message, target);

                let redirect = envelope.redirect.as_deref().or(options.redirect.as_deref());
                match redirect {
                    Some(redirect) => {
                        let delay = options
                            .redirect_delay
                            .unwrap_or(self.ui.timings.redirect_delay);
                        self.navigator.navigate_after(redirect, delay);
                    }
                    None => {
                        if let Some(form) = &options.form {
                            form.reset();
                        }
                    }
                }
                Ok(envelope)
            }
            Err(error) => {
                let (overlay, message) = failure_text(&error);
                self.ui.report(MessageKind::Error, &overlay, &message, target);
                Err(error)
            }
        }
    }
}
