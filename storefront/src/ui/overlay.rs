//! # Busy Overlay
//!
//! One process-wide blocking overlay. `show` puts up a spinner (or icon) with
//! a message and locks page scrolling; `hide` optionally swaps in a final
//! outcome, holds it, then dismisses and releases the scroll lock.
//!
//! Last writer wins: a `show` during a pending dismissal cancels it.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayIcon {
    Spinner,
    Success,
    Error,
    /// Renders without an icon.
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayView {
    pub visible: bool,
    pub message: String,
    /// `None` for [`OverlayIcon::Info`] and before the first `show`.
    pub icon: Option<OverlayIcon>,
    pub scroll_locked: bool,
}

#[derive(Default)]
struct OverlayState {
    view: OverlayView,
    generation: u64,
    dismiss: Option<JoinHandle<()>>,
}

impl OverlayState {
    fn cancel_dismiss(&mut self) {
        if let Some(task) = self.dismiss.take() {
            task.abort();
        }
    }

    fn set_content(&mut self, message: &str, icon: OverlayIcon) {
        self.view.message = message.to_string();
        self.view.icon = match icon {
            OverlayIcon::Info => None,
            other => Some(other),
        };
    }

    fn dismiss_now(&mut self) {
        self.view.visible = false;
        self.view.scroll_locked = false;
        self.dismiss = None;
    }
}

#[derive(Clone)]
pub struct BusyOverlay {
    state: Arc<RwLock<OverlayState>>,
    hold: Duration,
}

impl BusyOverlay {
    pub fn new(hold: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(OverlayState::default())),
            hold,
        }
    }

    pub fn show(&self, message: &str, icon: OverlayIcon) {
        let mut state = self.state.write();
        state.cancel_dismiss();
        state.generation += 1;
        state.set_content(message, icon);
        state.view.visible = true;
        state.view.scroll_locked = true;
    }

    /// Show the final outcome for the default hold, then dismiss.
    ///
    /// With no final message the overlay dismisses immediately.
    pub fn hide(&self, final_message: Option<&str>, final_icon: OverlayIcon) {
        self.hide_after(final_message, final_icon, self.hold);
    }

    pub fn hide_after(&self, final_message: Option<&str>, final_icon: OverlayIcon, hold: Duration) {
        let mut state = self.state.write();
        state.cancel_dismiss();
        state.generation += 1;

        let Some(message) = final_message else {
            state.dismiss_now();
            return;
        };
        state.set_content(message, final_icon);

        let generation = state.generation;
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let shared = Arc::clone(&self.state);
                state.dismiss = Some(runtime.spawn(async move {
                    tokio::time::sleep(hold).await;
                    let mut state = shared.write();
                    if state.generation == generation {
                        state.dismiss_now();
                    }
                }));
            }
            Err(_) => state.dismiss_now(),
        }
    }

    pub fn success(&self, message: &str) {
        self.hide(Some(message), OverlayIcon::Success);
    }

    pub fn error(&self, message: &str) {
        self.hide(Some(message), OverlayIcon::Error);
    }

    pub fn info(&self, message: &str) {
        self.hide(Some(message), OverlayIcon::Info);
    }

    pub fn view(&self) -> OverlayView {
        self.state.read().view.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state.read().view.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> BusyOverlay {
        BusyOverlay::new(Duration::from_millis(1500))
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_outcome_held_then_dismissed() {
        let overlay = overlay();
        overlay.show("Processing...", OverlayIcon::Spinner);
        let view = overlay.view();
        assert!(view.visible && view.scroll_locked);
        assert_eq!(view.icon, Some(OverlayIcon::Spinner));

        overlay.success("Product added to cart!");
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let view = overlay.view();
        assert!(view.visible);
        assert_eq!(view.icon, Some(OverlayIcon::Success));
        assert_eq!(view.message, "Product added to cart!");

        tokio::time::sleep(Duration::from_millis(600)).await;
        let view = overlay.view();
        assert!(!view.visible);
        assert!(!view.scroll_locked);
        assert_eq!(view.icon, Some(OverlayIcon::Success));
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_cancels_pending_dismissal() {
        let overlay = overlay();
        overlay.show("Updating cart...", OverlayIcon::Spinner);
        overlay.error("Out of stock");
        tokio::time::sleep(Duration::from_millis(500)).await;

        overlay.show("Updating cart...", OverlayIcon::Spinner);
        tokio::time::sleep(Duration::from_millis(2000)).await;

        let view = overlay.view();
        assert!(view.visible);
        assert_eq!(view.icon, Some(OverlayIcon::Spinner));
    }

    #[tokio::test]
    async fn test_hide_without_message_is_immediate() {
        let overlay = overlay();
        overlay.show("Loading...", OverlayIcon::Spinner);
        overlay.hide(None, OverlayIcon::Info);
        assert!(!overlay.is_visible());
        assert!(!overlay.view().scroll_locked);
    }

    #[test]
    fn test_info_icon_renders_nothing() {
        let overlay = overlay();
        overlay.show("Cart is empty.", OverlayIcon::Info);
        assert_eq!(overlay.view().icon, None);
    }
}
