use std::collections::HashMap;

use crate::error::AutofillError;
use crate::store::state_store::{Scope, StateStore};

/// In-process store; contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<(Scope, String), String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every session-scoped entry, as when a browser tab closes.
    pub fn end_session(&mut self) {
        self.entries.retain(|(scope, _), _| *scope != Scope::Session);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        self.entries.get(&(scope, key.to_string())).cloned()
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<(), AutofillError> {
        self.entries
            .insert((scope, key.to_string()), value.to_string());
        Ok(())
    }

    fn remove(&mut self, scope: Scope, key: &str) -> Result<(), AutofillError> {
        self.entries.remove(&(scope, key.to_string()));
        Ok(())
    }
}
