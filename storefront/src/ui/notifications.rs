//! # Notification Surface
//!
//! Per-target message slots ("productMessages", "cartPageMessages", ...).
//! A message stays visible for `message_hide`, fades for `message_fade`,
//! then its slot is cleared. A new message on the same target cancels the
//! pending hide timer of the previous one.

use crate::config::UiTimings;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePhase {
    Visible,
    Fading,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub text: String,
    pub kind: Option<MessageKind>,
    pub phase: MessagePhase,
}

impl MessageView {
    fn hidden() -> Self {
        Self {
            text: String::new(),
            kind: None,
            phase: MessagePhase::Hidden,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase != MessagePhase::Hidden
    }
}

struct Slot {
    view: MessageView,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl Slot {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Registry of message slots keyed by target id.
#[derive(Clone)]
pub struct NotificationSurface {
    slots: Arc<RwLock<HashMap<String, Slot>>>,
    timings: UiTimings,
}

impl NotificationSurface {
    pub fn new(timings: UiTimings) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            timings,
        }
    }

    /// Make `target_id` addressable. Registering twice keeps the current slot.
    pub fn register(&self, target_id: &str) {
        self.slots
            .write()
            .entry(target_id.to_string())
            .or_insert_with(|| Slot {
                view: MessageView::hidden(),
                generation: 0,
                timer: None,
            });
    }

    pub fn is_registered(&self, target_id: &str) -> bool {
        self.slots.read().contains_key(target_id)
    }

    /// Show `text` in the target slot and schedule its auto-hide.
    ///
    /// Empty text clears the slot immediately. An unknown target is logged
    /// and ignored. Returns whether a slot was updated.
    pub fn display_message(&self, text: &str, kind: MessageKind, target_id: &str) -> bool {
        let mut slots = self.slots.write();
        let Some(slot) = slots.get_mut(target_id) else {
            tracing::warn!(target_id, "Message target not registered");
            return false;
        };

        slot.cancel_timer();
        slot.generation += 1;

        if text.is_empty() {
            slot.view = MessageView::hidden();
            return true;
        }

        slot.view = MessageView {
            text: text.to_string(),
            kind: Some(kind),
            phase: MessagePhase::Visible,
        };
        slot.timer = self.schedule_hide(target_id, slot.generation);
        tracing::debug!(target_id, ?kind, text, "Message displayed");
        true
    }

    pub fn clear(&self, target_id: &str) {
        self.display_message("", MessageKind::Info, target_id);
    }

    /// Snapshot of a slot for rendering.
    pub fn view(&self, target_id: &str) -> Option<MessageView> {
        self.slots.read().get(target_id).map(|slot| slot.view.clone())
    }

    fn schedule_hide(&self, target_id: &str, generation: u64) -> Option<JoinHandle<()>> {
        let runtime = tokio::runtime::Handle::try_current().ok()?;
        let slots = Arc::clone(&self.slots);
        let target = target_id.to_string();
        let UiTimings {
            message_hide,
            message_fade,
            ..
        } = self.timings;

        Some(runtime.spawn(async move {
            tokio::time::sleep(message_hide).await;
            if !advance(&slots, &target, generation, MessagePhase::Fading) {
                return;
            }
            tokio::time::sleep(message_fade).await;
            advance(&slots, &target, generation, MessagePhase::Hidden);
        }))
    }
}

/// Move a slot to `phase` if it still shows the message from `generation`.
fn advance(
    slots: &RwLock<HashMap<String, Slot>>,
    target_id: &str,
    generation: u64,
    phase: MessagePhase,
) -> bool {
    let mut slots = slots.write();
    match slots.get_mut(target_id) {
        Some(slot) if slot.generation == generation => {
            if phase == MessagePhase::Hidden {
                slot.view = MessageView::hidden();
                slot.timer = None;
            } else {
                slot.view.phase = phase;
            }
            true
        }
        _ => false,
    }
}
