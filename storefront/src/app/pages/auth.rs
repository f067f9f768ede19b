//! # Authentication Pages
//!
//! Login, admin login, registration, password reset, the contact form and
//! logout. All form posts go through the standard submit flow.

use super::targets;
use crate::app::App;
use crate::core::error::{AppError, Result};
use crate::services::api::{auth, SubmitOptions};
use crate::ui::{BoundForm, DisplayCell, MessageKind, OverlayIcon, LOGIN_PAGE};
use crate::utils::validation::{validate_new_password, validate_password_confirmation};
use shared::{Envelope, NoPayload};
use std::time::Duration;

const LOGOUT_REDIRECT_DELAY: Duration = Duration::from_millis(1000);
const MISSING_RESET_TOKEN: &str =
    "Invalid or missing password reset token. Please try again from the forgot password link.";

pub struct AuthPage {
    app: App,
    pub login_form: BoundForm,
    pub admin_login_form: BoundForm,
    pub register_form: BoundForm,
    pub forgot_password_form: BoundForm,
    pub reset_password_form: BoundForm,
    pub contact_form: BoundForm,
    /// Hidden when the page was opened without a reset token.
    pub reset_form_visible: DisplayCell<bool>,
}

impl AuthPage {
    pub fn new(app: &App) -> Self {
        app.ui.notifications.register(targets::FORM);
        app.ui.notifications.register(targets::RESET);
        Self {
            app: app.clone(),
            login_form: BoundForm::new(&["email", "password"]),
            admin_login_form: BoundForm::new(&["email", "password"]),
            register_form: BoundForm::new(&["username", "email", "password", "confirmPassword"]),
            forgot_password_form: BoundForm::new(&["email"]),
            reset_password_form: BoundForm::new(&["token", "newPassword", "confirmNewPassword"]),
            contact_form: BoundForm::new(&["name", "email", "message"]),
            reset_form_visible: DisplayCell::new(true),
        }
    }

    /// Redirect target comes from the server.
    pub async fn login(&self) -> Result<Envelope> {
        self.app
            .requests
            .submit(
                auth::login(self.login_form.entries()),
                SubmitOptions::new(targets::FORM),
            )
            .await
    }

    pub async fn admin_login(&self) -> Result<Envelope> {
        self.app
            .requests
            .submit(
                auth::admin_login(self.admin_login_form.entries()),
                SubmitOptions::new(targets::FORM),
            )
            .await
    }

    pub async fn register(&self) -> Result<Envelope> {
        let form = &self.register_form;
        if let Err(message) =
            validate_password_confirmation(&form.get("password"), &form.get("confirmPassword"))
                .into_result()
        {
            return Err(self.reject(&message, targets::FORM));
        }
        self.app
            .requests
            .submit(
                auth::register(form.entries()),
                SubmitOptions::new(targets::FORM).redirect(LOGIN_PAGE),
            )
            .await
    }

    pub async fn forgot_password(&self) -> Result<Envelope> {
        self.app
            .requests
            .submit(
                auth::forgot_password(self.forgot_password_form.entries()),
                SubmitOptions::new(targets::RESET).clearing(&self.forgot_password_form),
            )
            .await
    }

    /// Page load with the `token` query parameter.
    ///
    /// Without a token the form is hidden and stays unusable.
    pub fn open_reset_password(&self, token: Option<&str>) {
        match token.filter(|token| !token.is_empty()) {
            Some(token) => {
                self.reset_password_form.set("token", token);
                self.reset_form_visible.set(true);
            }
            None => {
                tracing::warn!("Reset password page opened without a token");
                self.reset_form_visible.set(false);
                self.app
                    .ui
                    .message(MISSING_RESET_TOKEN, MessageKind::Error, targets::FORM);
            }
        }
    }

    pub async fn reset_password(&self) -> Result<Envelope> {
        let form = &self.reset_password_form;
        if !self.reset_form_visible.get() || form.trimmed("token").is_empty() {
            return Err(self.reject(MISSING_RESET_TOKEN, targets::FORM));
        }
        // Length rules are the server's here.
        if let Err(message) =
            validate_new_password(&form.get("newPassword"), &form.get("confirmNewPassword"), 0)
                .into_result()
        {
            return Err(self.reject(&message, targets::FORM));
        }
        self.app
            .requests
            .submit(
                auth::reset_password(form.entries()),
                SubmitOptions::new(targets::FORM).redirect(LOGIN_PAGE),
            )
            .await
    }

    pub async fn contact(&self) -> Result<Envelope> {
        self.app
            .requests
            .submit(
                auth::contact_us(self.contact_form.entries()),
                SubmitOptions::new(targets::FORM).clearing(&self.contact_form),
            )
            .await
    }

    /// Log out, zero the cart badge and return to the login page.
    pub async fn logout(&self) -> Result<Envelope> {
        let ui = &self.app.ui;
        ui.overlay.show("Logging out...", OverlayIcon::Spinner);

        match self
            .app
            .requests
            .exchange::<NoPayload>(auth::logout())
            .await
        {
            Ok(envelope) => {
                ui.report(
                    MessageKind::Success,
                    &envelope.message,
                    &envelope.message,
                    targets::FORM,
                );
                self.app.mark_logged_out();
                self.app
                    .navigator
                    .navigate_after(LOGIN_PAGE, LOGOUT_REDIRECT_DELAY);
                Ok(envelope)
            }
            Err(error) if error.is_server_verdict() => {
                let overlay = error.server_message().unwrap_or("Logout failed.");
                let message = format!(
                    "Logout failed: {}",
                    error.server_message().unwrap_or("Unknown error")
                );
                ui.report(MessageKind::Error, overlay, &message, targets::FORM);
                Err(error)
            }
            Err(error) => {
                ui.report(
                    MessageKind::Error,
                    "Network error during logout.",
                    "Network error during logout. Please try again.",
                    targets::FORM,
                );
                Err(error)
            }
        }
    }

    fn reject(&self, message: &str, target: &str) -> AppError {
        self.app.ui.message(message, MessageKind::Error, target);
        AppError::Validation(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pages::testing::{app, message};
    use crate::app::AppEvent;
    use crate::services::api::mock::MockTransport;
    use crate::services::api::Method;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_register_password_mismatch_skips_network() {
        let mock = Arc::new(MockTransport::new());
        let (app, _events) = app(&mock, false);
        let page = AuthPage::new(&app);
        page.register_form.set("password", "secret1");
        page.register_form.set("confirmPassword", "secret2");

        let result = page.register().await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(mock.request_count(), 0);
        assert_eq!(
            message(&app, targets::FORM),
            ("Passwords do not match.".to_string(), Some(MessageKind::Error))
        );
        assert!(!app.ui.overlay.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_redirects_to_login() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/api/register",
            200,
            r#"{"success":true,"message":"Registration successful! Please log in."}"#,
        );
        let (app, events) = app(&mock, false);
        let page = AuthPage::new(&app);
        page.register_form.fill([
            ("username", "asha".to_string()),
            ("email", "asha@example.com".to_string()),
            ("password", "secret1".to_string()),
            ("confirmPassword", "secret1".to_string()),
        ]);

        page.register().await.unwrap();

        let sent = mock.last_request_to("/api/register").unwrap();
        assert_eq!(sent.field("username"), Some("asha"));
        tokio::time::sleep(Duration::from_millis(501)).await;
        assert_eq!(events.try_recv(), Ok(AppEvent::Navigate("login.html".to_string())));
    }

    #[tokio::test]
    async fn test_missing_reset_token_hides_form() {
        let mock = Arc::new(MockTransport::new());
        let (app, _events) = app(&mock, false);
        let page = AuthPage::new(&app);

        page.open_reset_password(None);

        assert!(!page.reset_form_visible.get());
        assert_eq!(message(&app, targets::FORM).0, MISSING_RESET_TOKEN);
        assert!(page.reset_password().await.is_err());
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_reset_password_sends_token() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/api/reset_password",
            200,
            r#"{"success":true,"message":"Your password has been reset."}"#,
        );
        let (app, _events) = app(&mock, false);
        let page = AuthPage::new(&app);
        page.open_reset_password(Some("tok-123"));
        page.reset_password_form.set("newPassword", "abc");
        page.reset_password_form.set("confirmNewPassword", "abd");

        assert!(page.reset_password().await.is_err());
        assert_eq!(
            message(&app, targets::FORM).0,
            "New passwords do not match."
        );

        page.reset_password_form.set("confirmNewPassword", "abc");
        page.reset_password().await.unwrap();
        let sent = mock.last_request_to("/api/reset_password").unwrap();
        assert_eq!(sent.field("token"), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_forgot_password_reports_on_reset_target() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/api/forgot_password",
            200,
            r#"{"success":true,"message":"If that email is registered, a reset link has been sent."}"#,
        );
        let (app, _events) = app(&mock, false);
        let page = AuthPage::new(&app);
        page.forgot_password_form.set("email", "asha@example.com");

        page.forgot_password().await.unwrap();

        assert_eq!(message(&app, targets::RESET).1, Some(MessageKind::Success));
        assert_eq!(page.forgot_password_form.get("email"), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_resets_session_and_badge() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/api/logout",
            200,
            r#"{"success":true,"message":"Logged out successfully."}"#,
        );
        let (app, events) = app(&mock, true);
        app.cart_badge.set(3);
        let page = AuthPage::new(&app);

        page.logout().await.unwrap();

        assert!(!app.session.is_logged_in());
        assert_eq!(app.cart_badge.get(), 0);
        assert_eq!(app.ui.overlay.view().icon, Some(OverlayIcon::Success));
        assert!(matches!(events.try_recv(), Ok(AppEvent::SessionChanged(_))));

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(events.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(events.try_recv(), Ok(AppEvent::Navigate("login.html".to_string())));
    }

    #[tokio::test]
    async fn test_logout_failure_keeps_session() {
        let mock = Arc::new(MockTransport::new());
        mock.fail(Method::Post, "/api/logout", "connection reset");
        let (app, _events) = app(&mock, true);
        let page = AuthPage::new(&app);

        assert!(page.logout().await.is_err());

        assert!(app.session.is_logged_in());
        assert_eq!(app.ui.overlay.view().message, "Network error during logout.");
        assert_eq!(
            message(&app, targets::FORM),
            (
                "Network error during logout. Please try again.".to_string(),
                Some(MessageKind::Error)
            )
        );
    }
}
