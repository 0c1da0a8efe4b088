use serde::{Deserialize, Serialize};

use crate::error::AutofillError;

/// Lifetime of a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Survives across sessions (browser `localStorage`).
    Persistent,
    /// Dropped when the session ends (browser `sessionStorage`).
    Session,
}

/// String key/value store with a persistent and a session scope.
///
/// The resolver owns its store; nothing else writes to it while a
/// resolution is running.
pub trait StateStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String>;

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<(), AutofillError>;

    fn remove(&mut self, scope: Scope, key: &str) -> Result<(), AutofillError>;
}
