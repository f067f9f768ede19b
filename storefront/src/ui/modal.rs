//! # Login-Required Modal
//!
//! Shown by the gated-action guard when a logged-out visitor tries an action
//! that needs a session. Offers "log in" and "close".

use parking_lot::RwLock;
use std::sync::Arc;

/// Page the "log in" choice leads to.
pub const LOGIN_PAGE: &str = "login.html";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalView {
    pub visible: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoginModal {
    view: Arc<RwLock<ModalView>>,
}

impl LoginModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, prompt: &str) {
        let mut view = self.view.write();
        view.visible = true;
        view.message = prompt.to_string();
    }

    pub fn close(&self) {
        self.view.write().visible = false;
    }

    pub fn view(&self) -> ModalView {
        self.view.read().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.view.read().visible
    }
}
