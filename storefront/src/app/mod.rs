//! # Application Orchestrator
//!
//! [`App`] bundles what every page controller needs: the request client,
//! the UI state, the session context, the header cart badge and the
//! navigator. It is cheap to clone; clones share all state.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Host (renderer / CLI / test)                                │
//! │   - calls page controller actions                            │
//! │   - renders UiState snapshots                                │
//! │   - drains AppEvent receiver (Navigate, LoginPromptShown, …) │
//! └──────────────┬───────────────────────────────▲───────────────┘
//!                │ actions                       │ async_channel
//! ┌──────────────▼───────────────────────────────┴───────────────┐
//! │  pages::* controllers                                        │
//! │   ├── SessionContext::require_login (gated actions)          │
//! │   ├── optimistic::mutate (quantity / status cells)           │
//! │   └── RequestClient::{submit, exchange}                      │
//! └──────────────┬───────────────────────────────────────────────┘
//!                │ ApiRequest
//! ┌──────────────▼───────────────────────────────────────────────┐
//! │  ApiTransport (ApiClient over reqwest, or MockTransport)     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Management Pattern
//!
//! Shared state sits behind `Arc<parking_lot::RwLock<_>>`. Locks are taken
//! for a single read or write and never held across an `.await`.
//!
//! ## Related Modules
//!
//! - [`events`]: Events for the host
//! - [`session`]: Login state and the gated-action guard
//! - [`optimistic`]: Apply/commit/rollback of displayed values
//! - [`payment`]: Card payment confirmation state machine
//! - [`pages`]: One controller per storefront page

pub mod events;
pub mod optimistic;
pub mod pages;
pub mod payment;
pub mod session;

pub use events::AppEvent;
pub use session::SessionContext;

use crate::config::StorefrontConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiTransport;
use crate::services::api::{cart, RequestClient};
use crate::ui::{DisplayCell, MessageKind, Navigator, UiState, LOGIN_PAGE};
use async_channel::Receiver;
use shared::{CartCount, SessionStatus};
use std::sync::Arc;

#[derive(Clone)]
pub struct App {
    pub requests: RequestClient,
    pub ui: UiState,
    pub session: SessionContext,
    pub navigator: Navigator,
    /// Item count shown in the header on every page.
    pub cart_badge: DisplayCell<u32>,
    config: Arc<StorefrontConfig>,
}

impl App {
    /// Build the context and the receiver the host drains for [`AppEvent`]s.
    pub fn new(transport: Arc<dyn ApiTransport>, config: StorefrontConfig) -> (Self, Receiver<AppEvent>) {
        let (event_tx, event_rx) = async_channel::unbounded();
        let ui = UiState::new(config.timings);
        let navigator = Navigator::new(event_tx);
        let app = Self {
            requests: RequestClient::new(transport, ui.clone(), navigator.clone()),
            ui,
            session: SessionContext::default(),
            navigator,
            cart_badge: DisplayCell::new(0),
            config: Arc::new(config),
        };
        (app, event_rx)
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Page load: resolve the session, then the header cart count.
    pub async fn start(&self) -> SessionStatus {
        let status = self.session.refresh(&self.requests).await;
        let _ = self
            .navigator
            .events()
            .try_send(AppEvent::SessionChanged(status));
        self.refresh_cart_count().await;
        status
    }

    /// Gate an action on a session; see [`SessionContext::require_login`].
    pub fn require_login(&self, prompt: &str) -> Result<()> {
        self.session
            .require_login(&self.ui, self.navigator.events(), prompt)
    }

    /// The modal's "log in" choice.
    pub fn confirm_login_prompt(&self) {
        self.ui.modal.close();
        self.navigator.navigate(LOGIN_PAGE);
    }

    /// The modal's "close" choice.
    pub fn close_login_prompt(&self) {
        self.ui.modal.close();
    }

    /// Reload the header cart count. Logged out or failed reads show 0.
    pub async fn refresh_cart_count(&self) -> u32 {
        let count = if self.session.is_logged_in() {
            match self.requests.exchange::<CartCount>(cart::get_cart_count()).await {
                Ok(envelope) => envelope.data.count,
                Err(e) => {
                    tracing::warn!(error = %e, "Cart count unavailable");
                    0
                }
            }
        } else {
            0
        };
        self.cart_badge.set(count);
        count
    }

    pub(crate) fn mark_logged_out(&self) {
        self.session.mark_logged_out();
        self.cart_badge.set(0);
        let _ = self
            .navigator
            .events()
            .try_send(AppEvent::SessionChanged(SessionStatus::default()));
    }

    /// Report a failed page action on the overlay, then the message slot.
    pub(crate) fn report_failure(&self, error: &AppError, failure: &Failure<'_>) {
        let (overlay, message) = failure.wording(error);
        self.ui
            .report(MessageKind::Error, &overlay, &message, failure.target);
    }
}

/// Wording for a page action's failure paths.
///
/// Unreachable servers and unreadable answers use the network texts; server
/// rejections use the server's message, or `fallback` when it sent none.
pub(crate) struct Failure<'a> {
    pub target: &'a str,
    pub fallback: &'a str,
    pub network_overlay: &'a str,
    pub network_message: &'a str,
    /// Prepended to the message slot text, not the overlay.
    pub prefix: Option<String>,
    /// Fixed overlay text for server rejections.
    pub rejected_overlay: Option<&'a str>,
}

impl<'a> Failure<'a> {
    pub fn new(target: &'a str, fallback: &'a str, network_overlay: &'a str, network_message: &'a str) -> Self {
        Self {
            target,
            fallback,
            network_overlay,
            network_message,
            prefix: None,
            rejected_overlay: None,
        }
    }

    pub fn rejected_overlay(mut self, text: &'a str) -> Self {
        self.rejected_overlay = Some(text);
        self
    }

    pub fn prefixed(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    fn wording(&self, error: &AppError) -> (String, String) {
        match error {
            AppError::Validation(text) | AppError::NotAuthenticated(text) | AppError::State(text) => {
                (text.clone(), text.clone())
            }
            _ if !error.is_server_verdict() => (
                self.network_overlay.to_string(),
                self.network_message.to_string(),
            ),
            _ => {
                let text = error.server_message().unwrap_or(self.fallback);
                let message = match &self.prefix {
                    Some(prefix) => format!("{}{}", prefix, text),
                    None => text.to_string(),
                };
                let overlay = self.rejected_overlay.unwrap_or(text);
                (overlay.to_string(), message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::mock::MockTransport;
    use crate::services::api::Method;

    #[test]
    fn test_failure_wording() {
        let failure = Failure::new("t", "Failed to update quantity.", "Network error!", "Network error. Try again.")
            .prefixed("Failed to update quantity: ");

        let rejected = AppError::Rejected {
            message: "Out of stock".to_string(),
            errors: vec![],
        };
        assert_eq!(
            failure.wording(&rejected),
            (
                "Out of stock".to_string(),
                "Failed to update quantity: Out of stock".to_string()
            )
        );

        let silent = AppError::Rejected {
            message: String::new(),
            errors: vec![],
        };
        assert_eq!(failure.wording(&silent).0, "Failed to update quantity.");

        let fixed = Failure::new("t", "Failed to place order.", "Network error!", "x")
            .rejected_overlay("Order failed!");
        assert_eq!(
            fixed.wording(&rejected),
            ("Order failed!".to_string(), "Out of stock".to_string())
        );

        let offline = AppError::Transport("refused".to_string());
        assert_eq!(
            failure.wording(&offline),
            ("Network error!".to_string(), "Network error. Try again.".to_string())
        );
    }

    #[tokio::test]
    async fn test_start_loads_session_and_badge() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/check_login_status", 200, r#"{"is_logged_in":true}"#)
            .respond(Method::Get, "/api/get_cart_count", 200, r#"{"success":true,"count":4}"#);
        let (app, events) = App::new(Arc::new(mock), StorefrontConfig::default());

        let status = app.start().await;

        assert!(status.is_logged_in);
        assert_eq!(app.cart_badge.get(), 4);
        assert_eq!(events.try_recv(), Ok(AppEvent::SessionChanged(status)));
    }

    #[tokio::test]
    async fn test_logged_out_badge_skips_request() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::Get, "/api/check_login_status", 200, r#"{"is_logged_in":false}"#);
        let (app, _events) = App::new(mock.clone(), StorefrontConfig::default());
        app.cart_badge.set(9);

        app.start().await;

        assert_eq!(app.cart_badge.get(), 0);
        assert_eq!(mock.calls_to("/api/get_cart_count"), 0);
    }

    #[test]
    fn test_login_prompt_confirm_navigates() {
        let (app, events) = App::new(Arc::new(MockTransport::new()), StorefrontConfig::default());
        assert!(app.require_login("Please log in to view your cart.").is_err());
        assert!(app.ui.modal.is_visible());

        app.confirm_login_prompt();

        assert!(!app.ui.modal.is_visible());
        assert!(matches!(events.try_recv(), Ok(AppEvent::LoginPromptShown(_))));
        assert_eq!(events.try_recv(), Ok(AppEvent::Navigate("login.html".to_string())));
    }
}
