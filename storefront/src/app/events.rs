//! # Application Events
//!
//! Events flowing from controllers to the host over the `async_channel`
//! handed out by [`crate::app::App::new`]. The host owns the actual page
//! navigation; controllers only request it.

use shared::SessionStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Load another page (`login.html`, `/order_confirmation.html?order_id=7`, ...).
    Navigate(String),
    /// The login-required modal was opened with this prompt.
    LoginPromptShown(String),
    /// The session status was (re)loaded or changed by logout.
    SessionChanged(SessionStatus),
}
