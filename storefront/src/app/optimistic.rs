//! # Optimistic Mutations
//!
//! A displayed value is updated the moment the user acts, before the server
//! confirms. The previous value is kept so any failure restores it exactly;
//! a success keeps the optimistic value unless the server names an
//! authoritative one.
//!
//! ```text
//! apply ──► display = new_value ──► request
//!                                     ├─ Ok  ──► display = authoritative.unwrap_or(new_value)
//!                                     └─ Err ──► display = previous
//! ```
//!
//! Concurrent mutations on one cell are not serialized: whichever response
//! lands last decides the displayed value.

use crate::core::error::Result;
use crate::ui::DisplayCell;
use std::fmt::Debug;
use std::future::Future;

/// A quantity step requested by a `+`/`-` control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Increase,
    Decrease,
}

impl QuantityChange {
    /// Wire value of the `change_type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityChange::Increase => "increase",
            QuantityChange::Decrease => "decrease",
        }
    }

    /// Apply the step; decreasing below zero stays at zero.
    pub fn apply(self, current: u32) -> u32 {
        match self {
            QuantityChange::Increase => current.saturating_add(1),
            QuantityChange::Decrease => current.saturating_sub(1),
        }
    }
}

/// One in-flight optimistic change to a [`DisplayCell`].
#[derive(Debug)]
pub struct OptimisticMutation<T: Clone> {
    target: DisplayCell<T>,
    previous: T,
    new_value: T,
    confirmed: bool,
}

impl<T: Clone + Debug> OptimisticMutation<T> {
    /// Read the displayed value, compute the new one and display it.
    pub fn apply(target: &DisplayCell<T>, change: impl FnOnce(&T) -> T) -> Self {
        let previous = target.get();
        let new_value = change(&previous);
        target.set(new_value.clone());
        tracing::debug!(?previous, ?new_value, "Optimistic value displayed");
        Self {
            target: target.clone(),
            previous,
            new_value,
            confirmed: false,
        }
    }

    pub fn previous(&self) -> &T {
        &self.previous
    }

    pub fn new_value(&self) -> &T {
        &self.new_value
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Keep the change, replacing it with the server's value when given.
    pub fn commit(&mut self, authoritative: Option<T>) -> T {
        let value = authoritative.unwrap_or_else(|| self.new_value.clone());
        self.target.set(value.clone());
        self.confirmed = true;
        value
    }

    /// Restore the value displayed before `apply`.
    ///
    /// A confirmed change stays; the displayed value is returned untouched.
    pub fn rollback(&mut self) -> T {
        if self.confirmed {
            return self.target.get();
        }
        tracing::debug!(previous = ?self.previous, "Optimistic value rolled back");
        self.target.set(self.previous.clone());
        self.previous.clone()
    }
}

/// Run the full apply → request → reconcile cycle.
///
/// `request` receives the optimistic value. `authoritative` extracts the
/// server's value from a successful response.
pub async fn mutate<T, R, F, Fut>(
    target: &DisplayCell<T>,
    change: impl FnOnce(&T) -> T,
    request: F,
    authoritative: impl FnOnce(&R) -> Option<T>,
) -> Result<R>
where
    T: Clone + Debug,
    F: FnOnce(T) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    let mut mutation = OptimisticMutation::apply(target, change);
    match request(mutation.new_value().clone()).await {
        Ok(response) => {
            mutation.commit(authoritative(&response));
            Ok(response)
        }
        Err(error) => {
            mutation.rollback();
            Err(error)
        }
    }
}
