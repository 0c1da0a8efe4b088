use crate::error::AutofillError;
use crate::form::form_model::FormContext;
use crate::store::state_store::{Scope, StateStore};

/// Persistent key holding the "autofill enabled" preference.
pub const PREFERENCE_KEY: &str = "enable_prefill";

/// Prefix of the persistent per-context remembered target keys.
pub const REMEMBERED_PREFIX: &str = "microsys_autofill_";

/// Session key set when a form was submitted with autofill enabled.
pub const SUBMIT_MARKER_KEY: &str = "microsys_last_submit_autofill";

const TRUE: &str = "true";
const FALSE: &str = "false";

pub fn remembered_key(context: &FormContext) -> String {
    format!(
        "{}{}_{}",
        REMEMBERED_PREFIX, context.app_label, context.model_name
    )
}

pub fn preference_enabled<S: StateStore + ?Sized>(store: &S) -> bool {
    store.get(Scope::Persistent, PREFERENCE_KEY).as_deref() == Some(TRUE)
}

pub fn write_preference<S: StateStore + ?Sized>(
    store: &mut S,
    enabled: bool,
) -> Result<(), AutofillError> {
    let value = if enabled { TRUE } else { FALSE };
    store.set(Scope::Persistent, PREFERENCE_KEY, value)
}

/// Remembered target for a context; empty values count as absent.
pub fn remembered_target<S: StateStore + ?Sized>(
    store: &S,
    context: &FormContext,
) -> Option<String> {
    store
        .get(Scope::Persistent, &remembered_key(context))
        .filter(|v| !v.is_empty())
}

pub fn remember_target<S: StateStore + ?Sized>(
    store: &mut S,
    context: &FormContext,
    target: &str,
) -> Result<(), AutofillError> {
    store.set(Scope::Persistent, &remembered_key(context), target)
}

pub fn submit_marker_set<S: StateStore + ?Sized>(store: &S) -> bool {
    store.get(Scope::Session, SUBMIT_MARKER_KEY).as_deref() == Some(TRUE)
}

pub fn set_submit_marker<S: StateStore + ?Sized>(store: &mut S) -> Result<(), AutofillError> {
    store.set(Scope::Session, SUBMIT_MARKER_KEY, TRUE)
}

pub fn clear_submit_marker<S: StateStore + ?Sized>(store: &mut S) -> Result<(), AutofillError> {
    store.remove(Scope::Session, SUBMIT_MARKER_KEY)
}
