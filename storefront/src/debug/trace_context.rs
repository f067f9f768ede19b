//! Trace ID system for correlating one user action across its log lines
//!
//! A click that issues a request, waits on it, then updates the overlay and
//! message surface produces several log events. The action runs inside an
//! `action` span carrying a `trace_id` field, so every event it emits (across
//! any number of `.await`s, and alongside other actions on the same thread)
//! is tagged with the same ID by the subscriber.

use std::future::Future;
use tracing::instrument::Instrumented;
use tracing::{Instrument, Span};
use uuid::Uuid;

/// One user action's trace ID and the span that carries it.
pub struct ActionTrace {
    id: String,
    span: Span,
}

impl ActionTrace {
    pub fn new() -> Self {
        let id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("action", trace_id = %id);
        Self { id, span }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Run `action` inside this trace's span.
    pub fn run<F: Future>(self, action: F) -> Instrumented<F> {
        action.instrument(self.span)
    }
}

impl Default for ActionTrace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_action_gets_its_own_id() {
        let first = ActionTrace::new();
        let second = ActionTrace::new();
        assert_ne!(first.id(), second.id());
        assert_eq!(first.id().len(), 36);
    }

    #[tokio::test]
    async fn test_run_returns_the_action_output() {
        let trace = ActionTrace::new();
        assert_eq!(trace.run(async { 7 }).await, 7);
    }
}
