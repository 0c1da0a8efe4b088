use serde_json::{Map, Value};

use crate::autofill::coerce::control_value;
use crate::modal::modal_model::{Modal, RelatedRecords, related_items};

/// Element id of the modal; a new modal replaces the previous one.
pub const MODAL_ID: &str = "sectionManagerModal";

// ============================================================================
// Modal markup (Bootstrap 5 structure)
// ============================================================================

/// Render the complete modal element.
pub fn render_modal(modal: &Modal) -> String {
    format!(
        r#"<div class="modal fade" id="{id}" tabindex="-1" aria-hidden="true">
<div class="modal-dialog modal-dialog-centered modal-lg">
<div class="modal-content border-0 shadow-lg">
<div class="modal-header bg-{variant} text-white border-0">
<h5 class="modal-title fw-bold"><i class="bi bi-info-circle me-2"></i> {title}</h5>
<button type="button" class="btn-close btn-close-white" data-bs-dismiss="modal" aria-label="Close"></button>
</div>
<div class="modal-body p-4">
{body}
</div>
<div class="modal-footer bg-white border-top-0">
{footer}
</div>
</div>
</div>
</div>"#,
        id = MODAL_ID,
        variant = modal.variant.css_suffix(),
        title = escape_html(&modal.title),
        body = modal.body_html,
        footer = modal.footer_html,
    )
}

pub fn footer_button(label: &str, style: &str) -> String {
    format!(
        r#"<button type="button" class="btn btn-{} rounded-pill px-4" data-bs-dismiss="modal">{}</button>"#,
        escape_html(style),
        escape_html(label)
    )
}

/// Card grid of related records, one card per model.
pub fn related_html(related: &RelatedRecords) -> String {
    if related.is_empty() {
        return r#"<p class="text-muted text-center my-3">No related records.</p>"#.to_string();
    }

    let mut html = String::from("<div class=\"row g-3\">\n");
    for (model, items) in related {
        let list: String = related_items(items)
            .iter()
            .map(|item| {
                format!(
                    "<li class=\"list-group-item bg-light border-0 mb-1 rounded px-3 mx-2\">{}</li>",
                    escape_html(item)
                )
            })
            .collect();

        html.push_str(&format!(
            r#"<div class="col-md-6">
<div class="card h-100 border-0 shadow-sm">
<div class="card-header bg-white border-bottom-0 fw-bold text-primary">{}</div>
<ul class="list-group list-group-flush list-group-item-action">{}</ul>
</div>
</div>
"#,
            escape_html(model),
            list
        ));
    }
    html.push_str("</div>");
    html
}

/// Body of the details modal: field grid followed by related records.
pub fn details_body(fields: &Map<String, Value>, related: &RelatedRecords) -> String {
    let mut grid = String::from("<div class=\"row g-3 mb-4\">\n");
    for (label, value) in fields {
        grid.push_str(&format!(
            r#"<div class="col-md-6">
<div class="p-3 bg-white rounded shadow-sm border h-100">
<div class="text-muted small mb-1">{}</div>
<div class="fw-bold text-dark">{}</div>
</div>
</div>
"#,
            escape_html(label),
            escape_html(&control_value(value))
        ));
    }
    grid.push_str("</div>");

    format!(
        r#"<h6 class="fw-bold mb-3 text-secondary border-bottom pb-2">Record details</h6>
{}
<h6 class="fw-bold mb-3 text-secondary border-bottom pb-2 mt-4">Related records and usages</h6>
{}"#,
        grid,
        related_html(related)
    )
}

/// Body of the modal shown when a delete is blocked by dependent records.
pub fn related_blocked_body(related: &RelatedRecords) -> String {
    format!(
        r#"<div class="alert alert-danger border-0 d-flex align-items-center mb-4">
<i class="bi bi-exclamation-triangle-fill fs-3 me-3"></i>
<div>
<div class="fw-bold fs-5">This item cannot be deleted</div>
<div class="small">It is linked to the records below; delete or unlink them first.</div>
</div>
</div>
<h6 class="fw-bold mb-3 text-secondary">Related records:</h6>
{}"#,
        related_html(related)
    )
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
