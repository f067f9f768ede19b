//! # UI State
//!
//! The process-wide UI resources every controller writes to. Cloning a
//! [`UiState`] yields handles to the same notification slots, overlay and
//! modal.

use super::modal::LoginModal;
use super::notifications::{MessageKind, NotificationSurface};
use super::overlay::{BusyOverlay, OverlayIcon};
use crate::config::UiTimings;

#[derive(Clone)]
pub struct UiState {
    pub notifications: NotificationSurface,
    pub overlay: BusyOverlay,
    pub modal: LoginModal,
    pub timings: UiTimings,
}

impl UiState {
    pub fn new(timings: UiTimings) -> Self {
        Self {
            notifications: NotificationSurface::new(timings),
            overlay: BusyOverlay::new(timings.overlay_hold),
            modal: LoginModal::new(),
            timings,
        }
    }

    /// Put up the overlay spinner and an info message with the same text.
    pub fn busy(&self, text: &str, target_id: &str) {
        self.overlay.show(text, OverlayIcon::Spinner);
        self.notifications.display_message(text, MessageKind::Info, target_id);
    }

    /// Report one outcome on both surfaces; the overlay transitions first.
    pub fn report(&self, kind: MessageKind, overlay_text: &str, message: &str, target_id: &str) {
        let icon = match kind {
            MessageKind::Success => OverlayIcon::Success,
            MessageKind::Error => OverlayIcon::Error,
            MessageKind::Info => OverlayIcon::Info,
        };
        self.overlay.hide(Some(overlay_text), icon);
        self.notifications.display_message(message, kind, target_id);
    }

    pub fn message(&self, text: &str, kind: MessageKind, target_id: &str) {
        self.notifications.display_message(text, kind, target_id);
    }

    /// Page scrolling is locked while the overlay or the modal is up.
    pub fn scroll_locked(&self) -> bool {
        self.overlay.view().scroll_locked || self.modal.is_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_report_sets_both_surfaces() {
        let ui = UiState::new(UiTimings::default());
        ui.notifications.register("formMessages");

        ui.busy("Processing...", "formMessages");
        assert!(ui.scroll_locked());

        ui.report(MessageKind::Error, "Out of stock", "Error: Out of stock", "formMessages");
        assert_eq!(ui.overlay.view().icon, Some(OverlayIcon::Error));
        let message = ui.notifications.view("formMessages").unwrap();
        assert_eq!(message.kind, Some(MessageKind::Error));
        assert_eq!(message.text, "Error: Out of stock");
    }

    #[test]
    fn test_modal_locks_scroll() {
        let ui = UiState::new(UiTimings::default());
        assert!(!ui.scroll_locked());
        ui.modal.show("Please log in to add items to your cart.");
        assert!(ui.scroll_locked());
        ui.modal.close();
        assert!(!ui.scroll_locked());
    }
}
