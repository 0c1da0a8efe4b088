use serde::{Deserialize, Serialize};

/// Name Django gives the hidden CSRF token input.
pub const CSRF_TOKEN_NAME: &str = "csrfmiddlewaretoken";

/// How a control reacts to being filled or cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    Text,
    Number,
    Checkbox,
    Radio,
    Hidden,
    Submit,
    Select,
    TextArea,
    /// An element that is not a form control (button, output, ...)
    Other,
}

/// A single named control inside a form.
///
/// Mirrors the attributes the autofill engine reads from the DOM: the tag,
/// the `type` attribute, the `name` it is bound to and its live value or
/// checked state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormControl {
    pub tag: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
}

impl FormControl {
    pub fn input(input_type: &str, name: &str) -> Self {
        FormControl {
            tag: "input".into(),
            input_type: Some(input_type.to_string()),
            name: name.to_string(),
            value: String::new(),
            checked: false,
        }
    }

    pub fn select(name: &str) -> Self {
        FormControl {
            tag: "select".into(),
            input_type: None,
            name: name.to_string(),
            value: String::new(),
            checked: false,
        }
    }

    pub fn textarea(name: &str) -> Self {
        FormControl {
            tag: "textarea".into(),
            input_type: None,
            name: name.to_string(),
            value: String::new(),
            checked: false,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Classify the control from its tag and `type` attribute.
    ///
    /// An `input` without a `type` is a text input, as in HTML.
    pub fn kind(&self) -> ControlKind {
        match self.tag.to_ascii_lowercase().as_str() {
            "select" => ControlKind::Select,
            "textarea" => ControlKind::TextArea,
            "input" => {
                let t = self
                    .input_type
                    .as_deref()
                    .map(|t| t.to_ascii_lowercase())
                    .unwrap_or_default();
                match t.as_str() {
                    "number" => ControlKind::Number,
                    "checkbox" => ControlKind::Checkbox,
                    "radio" => ControlKind::Radio,
                    "hidden" => ControlKind::Hidden,
                    "submit" => ControlKind::Submit,
                    _ => ControlKind::Text,
                }
            }
            _ => ControlKind::Other,
        }
    }

    pub fn is_csrf_token(&self) -> bool {
        self.name == CSRF_TOKEN_NAME
    }

    /// Whether toggling autofill off resets this control.
    pub fn is_clearable(&self) -> bool {
        !matches!(
            self.kind(),
            ControlKind::Hidden | ControlKind::Submit | ControlKind::Other
        ) && !self.is_csrf_token()
    }
}
