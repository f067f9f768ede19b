//! # Delayed Navigation
//!
//! Redirects after a success are delayed so the outcome stays readable.
//! Only the most recently requested redirect fires.

use crate::app::events::AppEvent;
use async_channel::Sender;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct Navigator {
    events: Sender<AppEvent>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Navigator {
    pub fn new(events: Sender<AppEvent>) -> Self {
        Self {
            events,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    pub fn navigate(&self, target: &str) {
        self.cancel_pending();
        self.emit(target.to_string());
    }

    /// Navigate to `target` once `delay` has elapsed, superseding any
    /// redirect still waiting.
    pub fn navigate_after(&self, target: &str, delay: Duration) {
        let mut pending = self.pending.lock();
        if let Some(task) = pending.take() {
            task.abort();
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            drop(pending);
            self.emit(target.to_string());
            return;
        };

        let events = self.events.clone();
        let target = target.to_string();
        *pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!(target = %target, "Navigating");
            if events.send(AppEvent::Navigate(target)).await.is_err() {
                tracing::warn!("Navigation dropped: event receiver closed");
            }
        }));
    }

    pub fn cancel_pending(&self) {
        if let Some(task) = self.pending.lock().take() {
            task.abort();
        }
    }

    fn emit(&self, target: String) {
        tracing::info!(target = %target, "Navigating");
        if self.events.try_send(AppEvent::Navigate(target)).is_err() {
            tracing::warn!("Navigation dropped: event receiver closed");
        }
    }

    pub(crate) fn events(&self) -> &Sender<AppEvent> {
        &self.events
    }
}
