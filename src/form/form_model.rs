use serde::{Deserialize, Serialize};

use crate::form::control::FormControl;

/// Element id of the checkbox that reflects the autofill preference.
pub const TOGGLE_ELEMENT_ID: &str = "autofillToggle";

// ============================================================================
// Form context
// ============================================================================

/// The (application label, model name) pair a creation form is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormContext {
    pub app_label: String,
    pub model_name: String,
}

impl FormContext {
    /// Both parts must be non-empty, otherwise the form has no context.
    pub fn new(app_label: &str, model_name: &str) -> Option<Self> {
        if app_label.is_empty() || model_name.is_empty() {
            return None;
        }
        Some(FormContext {
            app_label: app_label.to_string(),
            model_name: model_name.to_string(),
        })
    }
}

impl std::fmt::Display for FormContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.app_label, self.model_name)
    }
}

// ============================================================================
// FormSurface - the seam between the engine and a real DOM
// ============================================================================

/// Read/write access to the controls of one form.
///
/// Controls are addressed by their position in document order so that a
/// lookup and a later write never hold overlapping borrows.
pub trait FormSurface {
    /// Context declared on the form element, if both attributes are present.
    fn context(&self) -> Option<FormContext>;

    /// All controls in document order.
    fn controls(&self) -> &[FormControl];

    fn control_mut(&mut self, index: usize) -> Option<&mut FormControl>;

    /// Fire a bubbling `change` notification for the control at `index`.
    fn dispatch_change(&mut self, index: usize);

    /// First control bound to `name`, by exact match.
    fn find(&self, name: &str) -> Option<usize> {
        self.controls().iter().position(|c| c.name == name)
    }
}

// ============================================================================
// Snapshot implementation
// ============================================================================

/// A form captured as data, e.g. from a JSON page snapshot.
///
/// Change notifications are recorded in `changes` (control names, in
/// dispatch order) so dependants can replay them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form {
    #[serde(rename = "appLabel", default, skip_serializing_if = "Option::is_none")]
    pub app_label: Option<String>,
    #[serde(rename = "modelName", default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default)]
    pub controls: Vec<FormControl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<String>,
}

impl Form {
    pub fn new(app_label: &str, model_name: &str) -> Self {
        Form {
            app_label: Some(app_label.to_string()),
            model_name: Some(model_name.to_string()),
            controls: Vec::new(),
            changes: Vec::new(),
        }
    }

    pub fn with_control(mut self, control: FormControl) -> Self {
        self.controls.push(control);
        self
    }

    pub fn control(&self, name: &str) -> Option<&FormControl> {
        self.controls.iter().find(|c| c.name == name)
    }

    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.control(name).map(|c| c.value.as_str())
    }
}

impl FormSurface for Form {
    fn context(&self) -> Option<FormContext> {
        FormContext::new(self.app_label.as_deref()?, self.model_name.as_deref()?)
    }

    fn controls(&self) -> &[FormControl] {
        &self.controls
    }

    fn control_mut(&mut self, index: usize) -> Option<&mut FormControl> {
        self.controls.get_mut(index)
    }

    fn dispatch_change(&mut self, index: usize) {
        if let Some(control) = self.controls.get(index) {
            self.changes.push(control.name.clone());
        }
    }
}

/// Everything on a page the autofill handlers touch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Checked state of the `autofillToggle` checkbox; `None` when the page
    /// has no toggle.
    #[serde(rename = "autofillToggle", default, skip_serializing_if = "Option::is_none")]
    pub toggle: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<Form>,
}

impl PageSnapshot {
    pub fn new(form: Form) -> Self {
        PageSnapshot {
            toggle: Some(false),
            form: Some(form),
        }
    }
}
