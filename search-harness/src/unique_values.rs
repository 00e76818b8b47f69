//! Randomized fixture values shared by all four call variants.
//!
//! A value is generated the first time its key is requested and cached for
//! the lifetime of the store, so every variant sees the same value no
//! matter which variant is current. The current view only labels which
//! variant is running.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::call_variant::CallVariant;
use crate::error::HarnessError;

/// Length of generated tokens.
pub const TOKEN_LEN: usize = 8;

/// Returns a random lowercase hex token of [`TOKEN_LEN`] characters.
pub fn random_token() -> String {
    format!("{:08x}", rand::random::<u32>())
}

#[derive(Default)]
struct State {
    current_view: Option<CallVariant>,
    values: HashMap<String, String>,
    isolated: HashMap<(CallVariant, String), String>,
    extended: HashMap<String, Box<dyn Any + Send + Sync>>,
}

/// Per-test cache of generated fixture values.
#[derive(Default)]
pub struct CallUniqueValues {
    state: Mutex<State>,
}

impl std::fmt::Debug for CallUniqueValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("CallUniqueValues")
            .field("current_view", &state.current_view)
            .field("values", &state.values)
            .field("isolated", &state.isolated.len())
            .field("extended", &state.extended.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CallUniqueValues {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the variant currently running, defaulting to
    /// [`CallVariant::Fluent`] before any call has been made.
    pub fn current_view(&self) -> CallVariant {
        self.lock().current_view.unwrap_or(CallVariant::Fluent)
    }

    /// Marks `variant` as the one currently running.
    pub fn set_current_view(&self, variant: CallVariant) {
        self.lock().current_view = Some(variant);
    }

    /// Returns the token for `key`, generating it on first access.
    pub fn value(&self, key: &str) -> String {
        self.lock()
            .values
            .entry(key.to_string())
            .or_insert_with(random_token)
            .clone()
    }

    /// Returns a token for `key` that is distinct per current view.
    pub fn isolated_value(&self, key: &str) -> String {
        let mut state = self.lock();
        let view = state.current_view.unwrap_or(CallVariant::Fluent);
        state
            .isolated
            .entry((view, key.to_string()))
            .or_insert_with(random_token)
            .clone()
    }

    /// Returns the typed value for `key`, generating it with `generate` on
    /// first access.
    ///
    /// ## Errors
    ///
    /// Returns [`HarnessError::TypeMismatch`] if `key` already holds a value
    /// of another type.
    pub fn extended_value<T, F>(&self, key: &str, generate: F) -> Result<T, HarnessError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let mut state = self.lock();
        let slot = state
            .extended
            .entry(key.to_string())
            .or_insert_with(|| Box::new(generate()));
        slot.downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| HarnessError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Returns the typed value stored under `key`, if any.
    pub fn try_extended_value<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        self.lock()
            .extended
            .get(key)
            .and_then(|v| v.downcast_ref::<T>())
            .cloned()
    }

    /// Stores a typed value under `key`, replacing any previous one.
    pub fn set_extended_value<T: Send + Sync + 'static>(&self, key: &str, value: T) {
        self.lock()
            .extended
            .insert(key.to_string(), Box::new(value));
    }
}
