use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::autofill::coerce::control_value;
use crate::modal::html::{details_body, footer_button, related_blocked_body};

// ============================================================================
// Server answers of the section view/delete endpoints
// ============================================================================

/// Records that reference the inspected record, grouped by model label.
pub type RelatedRecords = Map<String, Value>;

/// Answer of the section details view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailsResponse {
    pub success: bool,
    #[serde(default)]
    pub title: Option<String>,
    /// Field label to display value, in server order.
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub related: RelatedRecords,
    #[serde(default)]
    pub error: Option<String>,
}

/// Answer of the section delete view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    /// Present when the delete was refused because other records depend on
    /// this one.
    #[serde(default)]
    pub related: Option<RelatedRecords>,
    #[serde(default)]
    pub error: Option<String>,
}

// ============================================================================
// Modal
// ============================================================================

/// Header colour of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalVariant {
    Primary,
    Danger,
}

impl ModalVariant {
    pub fn css_suffix(&self) -> &'static str {
        match self {
            ModalVariant::Primary => "primary",
            ModalVariant::Danger => "danger",
        }
    }
}

/// A modal dialog ready to render. `body_html` and `footer_html` are
/// already-escaped markup; `title` is plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modal {
    pub title: String,
    pub body_html: String,
    pub footer_html: String,
    pub variant: ModalVariant,
}

/// What the UI should do after a delete request.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// Deleted; the listing should reload.
    Deleted,
    /// Refused because of dependent records.
    Blocked(Modal),
    /// Refused for another reason; show the message.
    Failed(String),
}

/// Flatten a related-records group into display strings.
pub fn related_items(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(control_value).collect(),
        Value::Null => Vec::new(),
        other => vec![control_value(other)],
    }
}

/// Build the details modal, or the server's error message.
///
/// `fallback_title` is used when the server sends no title, typically the
/// name shown on the row the user clicked.
pub fn details_modal(response: &DetailsResponse, fallback_title: &str) -> Result<Modal, String> {
    if !response.success {
        return Err(response
            .error
            .clone()
            .unwrap_or_else(|| "Unknown error".to_string()));
    }

    Ok(Modal {
        title: response
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| fallback_title.to_string()),
        body_html: details_body(&response.fields, &response.related),
        footer_html: footer_button("Done", "primary"),
        variant: ModalVariant::Primary,
    })
}

/// Interpret a delete answer.
pub fn delete_outcome(response: &DeleteResponse) -> DeleteOutcome {
    if response.success {
        return DeleteOutcome::Deleted;
    }

    match &response.related {
        Some(related) => DeleteOutcome::Blocked(Modal {
            title: "Delete failed".to_string(),
            body_html: related_blocked_body(related),
            footer_html: footer_button("Close", "secondary"),
            variant: ModalVariant::Danger,
        }),
        None => DeleteOutcome::Failed(
            response
                .error
                .clone()
                .unwrap_or_else(|| "Unknown error".to_string()),
        ),
    }
}
