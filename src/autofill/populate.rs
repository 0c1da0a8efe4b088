use serde::Serialize;
use serde_json::Value;

use crate::api::record::{Record, is_metadata_key};
use crate::autofill::coerce::{control_value, parse_leading_int, truthy};
use crate::form::control::{ControlKind, FormControl};
use crate::form::form_model::FormSurface;

/// Substrings that mark a numeric control as the record's running number.
pub const SEQUENCE_HINTS: [&str; 2] = ["number", "sequence"];

// ============================================================================
// Outcomes
// ============================================================================

/// What happened to one record entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldOutcome {
    /// Value written into a text-like control.
    Written { value: String },
    /// Checkbox state set.
    Checked { checked: bool },
    /// Key is record metadata and never touches the form.
    Metadata,
    /// No control carries this name.
    NoControl,
    /// A control exists but its kind has no fill policy (radio buttons).
    Unsupported { kind: ControlKind },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub key: String,
    pub outcome: FieldOutcome,
}

/// Result of the auto-increment pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IncrementOutcome {
    NoNumericControl,
    NotANumber { name: String, value: String },
    Incremented { name: String, from: i64, to: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulateReport {
    pub fields: Vec<FieldReport>,
    pub increment: IncrementOutcome,
}

impl PopulateReport {
    /// Number of controls that received a value or checked state.
    pub fn applied_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| {
                matches!(
                    f.outcome,
                    FieldOutcome::Written { .. } | FieldOutcome::Checked { .. }
                )
            })
            .count()
    }

    pub fn outcome_for(&self, key: &str) -> Option<&FieldOutcome> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.outcome)
    }
}

// ============================================================================
// Population
// ============================================================================

/// Copy a record into a form, then bump its sequence control.
pub fn populate_form<F: FormSurface + ?Sized>(form: &mut F, record: &Record) -> PopulateReport {
    let fields = record
        .entries()
        .map(|(key, value)| FieldReport {
            key: key.clone(),
            outcome: apply_field(form, key, value),
        })
        .collect();

    let increment = bump_sequence(form);

    PopulateReport { fields, increment }
}

/// Write one record entry into the control bound to `key`.
pub fn apply_field<F: FormSurface + ?Sized>(form: &mut F, key: &str, value: &Value) -> FieldOutcome {
    if is_metadata_key(key) {
        return FieldOutcome::Metadata;
    }

    let index = match form.find(key) {
        Some(i) => i,
        None => return FieldOutcome::NoControl,
    };

    let outcome = match form.control_mut(index) {
        Some(control) => match control.kind() {
            ControlKind::Checkbox => {
                control.checked = truthy(value);
                FieldOutcome::Checked {
                    checked: control.checked,
                }
            }
            ControlKind::Radio => {
                // nothing was set, so no change notification either
                return FieldOutcome::Unsupported {
                    kind: ControlKind::Radio,
                };
            }
            _ => {
                control.value = control_value(value);
                FieldOutcome::Written {
                    value: control.value.clone(),
                }
            }
        },
        None => return FieldOutcome::NoControl,
    };

    form.dispatch_change(index);
    outcome
}

// ============================================================================
// Auto-increment
// ============================================================================

/// Pick the numeric control that holds the running number.
///
/// The first `type="number"` input whose name contains one of
/// [`SEQUENCE_HINTS`] wins; otherwise the first numeric input.
pub fn pick_sequence_control(controls: &[FormControl]) -> Option<usize> {
    let numeric: Vec<usize> = controls
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind() == ControlKind::Number)
        .map(|(i, _)| i)
        .collect();

    numeric
        .iter()
        .copied()
        .find(|&i| {
            SEQUENCE_HINTS
                .iter()
                .any(|hint| controls[i].name.contains(hint))
        })
        .or_else(|| numeric.first().copied())
}

/// Increment the sequence control by one, if it holds a number.
pub fn bump_sequence<F: FormSurface + ?Sized>(form: &mut F) -> IncrementOutcome {
    let index = match pick_sequence_control(form.controls()) {
        Some(i) => i,
        None => return IncrementOutcome::NoNumericControl,
    };

    let control = match form.control_mut(index) {
        Some(c) => c,
        None => return IncrementOutcome::NoNumericControl,
    };

    let from = match parse_leading_int(&control.value) {
        Some(n) => n,
        None => {
            return IncrementOutcome::NotANumber {
                name: control.name.clone(),
                value: control.value.clone(),
            };
        }
    };

    let to = match from.checked_add(1) {
        Some(n) => n,
        None => {
            return IncrementOutcome::NotANumber {
                name: control.name.clone(),
                value: control.value.clone(),
            };
        }
    };

    control.value = to.to_string();
    let name = control.name.clone();
    form.dispatch_change(index);

    IncrementOutcome::Incremented { name, from, to }
}

// ============================================================================
// Clearing
// ============================================================================

/// Reset every user-editable control; returns how many were cleared.
///
/// Hidden inputs, submit buttons and the CSRF token are left alone.
pub fn clear_form<F: FormSurface + ?Sized>(form: &mut F) -> usize {
    let targets: Vec<usize> = form
        .controls()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_clearable())
        .map(|(i, _)| i)
        .collect();

    for &index in &targets {
        if let Some(control) = form.control_mut(index) {
            match control.kind() {
                ControlKind::Checkbox | ControlKind::Radio => control.checked = false,
                _ => control.value.clear(),
            }
        }
        form.dispatch_change(index);
    }

    targets.len()
}
