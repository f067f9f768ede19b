//! # Session Context
//!
//! Whether the visitor is logged in, loaded once per page from
//! `GET /api/check_login_status` and shared by every controller on it.
//! The server remains the authority: the guard built on this only decides
//! whether to show the login modal instead of issuing a request.

use crate::app::events::AppEvent;
use crate::core::error::{AppError, Result};
use crate::services::api::{auth, RequestClient};
use crate::ui::UiState;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::SessionStatus;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    status: Arc<RwLock<SessionStatus>>,
}

impl SessionContext {
    pub fn new(status: SessionStatus) -> Self {
        Self {
            status: Arc::new(RwLock::new(status)),
        }
    }

    /// Reload from the server. A failed check counts as logged out.
    pub async fn refresh(&self, requests: &RequestClient) -> SessionStatus {
        let status = match requests
            .fetch::<SessionStatus>(auth::check_login_status())
            .await
        {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "Login status check failed; treating as logged out");
                SessionStatus::default()
            }
        };
        *self.status.write() = status;
        tracing::info!(logged_in = status.is_logged_in, admin = status.is_admin, "Session loaded");
        status
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.read()
    }

    pub fn is_logged_in(&self) -> bool {
        self.status.read().is_logged_in
    }

    pub fn is_admin(&self) -> bool {
        self.status.read().is_admin
    }

    pub fn set(&self, status: SessionStatus) {
        *self.status.write() = status;
    }

    pub fn mark_logged_out(&self) {
        *self.status.write() = SessionStatus::default();
    }

    /// Gate an action on a session.
    ///
    /// When logged out, opens the login modal with `prompt` and returns
    /// [`AppError::NotAuthenticated`]; callers return before touching any
    /// display value or issuing a request.
    pub fn require_login(&self, ui: &UiState, events: &Sender<AppEvent>, prompt: &str) -> Result<()> {
        if self.is_logged_in() {
            return Ok(());
        }
        tracing::info!(prompt, "Gated action blocked: not logged in");
        ui.modal.show(prompt);
        let _ = events.try_send(AppEvent::LoginPromptShown(prompt.to_string()));
        Err(AppError::NotAuthenticated(prompt.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiTimings;
    use crate::services::api::mock::MockTransport;
    use crate::services::api::Method;
    use crate::ui::Navigator;

    fn requests(mock: MockTransport) -> RequestClient {
        let (tx, _rx) = async_channel::unbounded();
        RequestClient::new(Arc::new(mock), UiState::new(UiTimings::default()), Navigator::new(tx))
    }

    #[tokio::test]
    async fn test_refresh_reads_status() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            auth::CHECK_LOGIN_STATUS,
            200,
            r#"{"is_logged_in":true}"#,
        );
        let session = SessionContext::default();
        let status = session.refresh(&requests(mock)).await;
        assert!(status.is_logged_in);
        assert!(!status.is_admin);
        assert!(session.is_logged_in());
    }

    #[tokio::test]
    async fn test_failed_check_means_logged_out() {
        let mock = MockTransport::new();
        mock.fail(Method::Get, auth::CHECK_LOGIN_STATUS, "connection refused");
        let session = SessionContext::new(SessionStatus {
            is_logged_in: true,
            is_admin: false,
        });
        session.refresh(&requests(mock)).await;
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_guard_shows_modal_when_logged_out() {
        let ui = UiState::new(UiTimings::default());
        let (tx, rx) = async_channel::unbounded();
        let session = SessionContext::default();

        let result = session.require_login(&ui, &tx, "Please log in to add items to your cart.");

        assert!(matches!(result, Err(AppError::NotAuthenticated(_))));
        assert!(ui.modal.is_visible());
        assert_eq!(ui.modal.view().message, "Please log in to add items to your cart.");
        assert_eq!(
            rx.try_recv(),
            Ok(AppEvent::LoginPromptShown(
                "Please log in to add items to your cart.".to_string()
            ))
        );
    }

    #[test]
    fn test_guard_passes_when_logged_in() {
        let ui = UiState::new(UiTimings::default());
        let (tx, _rx) = async_channel::unbounded();
        let session = SessionContext::new(SessionStatus {
            is_logged_in: true,
            is_admin: false,
        });
        assert!(session.require_login(&ui, &tx, "unused").is_ok());
        assert!(!ui.modal.is_visible());
    }
}
