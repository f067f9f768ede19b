//! # View Bindings
//!
//! Headless stand-ins for the page elements controllers write to. A host
//! renderer reads them; tests assert on them.
//!
//! - [`DisplayCell`]: one displayed value (a quantity, a status, a label)
//! - [`BoundForm`]: an ordered set of named input fields

use parking_lot::RwLock;
use std::sync::Arc;

/// A shared, displayed value.
///
/// Clones refer to the same value, so a controller and a renderer can each
/// hold one.
#[derive(Debug, Default)]
pub struct DisplayCell<T> {
    value: Arc<RwLock<T>>,
}

impl<T> Clone for DisplayCell<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

impl<T: Clone> DisplayCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
        }
    }

    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    pub fn set(&self, value: T) {
        *self.value.write() = value;
    }

    /// Replace the value, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *self.value.write(), value)
    }
}

#[derive(Debug, Default)]
struct FormState {
    fields: Vec<(String, String)>,
    read_only: bool,
}

/// A form with named text fields, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct BoundForm {
    state: Arc<RwLock<FormState>>,
}

impl BoundForm {
    /// A form with the given fields, all empty.
    pub fn new(names: &[&str]) -> Self {
        let fields = names
            .iter()
            .map(|name| (name.to_string(), String::new()))
            .collect();
        Self {
            state: Arc::new(RwLock::new(FormState {
                fields,
                read_only: false,
            })),
        }
    }

    /// Current value of a field; empty when the field does not exist.
    pub fn get(&self, name: &str) -> String {
        self.state
            .read()
            .fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    /// Value with surrounding whitespace removed.
    pub fn trimmed(&self, name: &str) -> String {
        self.get(name).trim().to_string()
    }

    /// Set a field. Unknown names are appended so the form mirrors what the
    /// host rendered.
    pub fn set(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let mut state = self.state.write();
        match state.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value,
            None => state.fields.push((name.to_string(), value)),
        }
    }

    /// Fill several fields at once; fields not named keep their value.
    pub fn fill<'a, I>(&self, values: I)
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        for (name, value) in values {
            self.set(name, value);
        }
    }

    /// All fields in declaration order, as submitted.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.state.read().fields.clone()
    }

    /// Clear every field value.
    pub fn reset(&self) {
        for (_, value) in self.state.write().fields.iter_mut() {
            value.clear();
        }
    }

    /// Names of `required` fields that are blank after trimming.
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| self.trimmed(name).is_empty())
            .map(|name| name.to_string())
            .collect()
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.state.write().read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.state.read().read_only
    }
}
