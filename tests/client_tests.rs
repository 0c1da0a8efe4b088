use microsys_autofill::{
    api::{
        client::{details_path, endpoint_url, last_entry_path, parse_record_body},
        record::{PK_FIELD, Record, is_metadata_key},
    },
    error::AutofillError,
    form::form_model::FormContext,
};
use serde_json::json;

fn ctx() -> FormContext {
    FormContext::new("sales", "invoice").unwrap()
}

// =========================================================================
// Endpoint paths
// =========================================================================

#[test]
fn endpoint_paths_match_server_routes() {
    assert_eq!(last_entry_path(&ctx()), "/sys/api/last-entry/sales/invoice/");
    assert_eq!(details_path(&ctx(), "17"), "/sys/api/details/sales/invoice/17/");
}

#[test]
fn endpoint_url_joins_without_double_slash() {
    assert_eq!(
        endpoint_url("http://host:8000/", "/sys/api/x/"),
        "http://host:8000/sys/api/x/"
    );
    assert_eq!(
        endpoint_url("http://host:8000", "/sys/api/x/"),
        "http://host:8000/sys/api/x/"
    );
}

#[test]
fn form_context_requires_both_parts() {
    assert!(FormContext::new("", "invoice").is_none());
    assert!(FormContext::new("sales", "").is_none());
    assert_eq!(ctx().to_string(), "sales.invoice");
}

// =========================================================================
// Response classification
// =========================================================================

#[test]
fn object_body_becomes_ordered_record() {
    let body = r#"{"_pk": 7, "zeta": "z", "alpha": "a"}"#;
    let record = parse_record_body("u", 200, body).unwrap().unwrap();

    assert_eq!(record.pk().as_deref(), Some("7"));
    let keys: Vec<&str> = record.entries().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["_pk", "zeta", "alpha"], "Server order is kept");
}

#[test]
fn empty_or_null_body_means_nothing_found() {
    assert_eq!(parse_record_body("u", 200, "").unwrap(), None);
    assert_eq!(parse_record_body("u", 200, "  \n").unwrap(), None);
    assert_eq!(parse_record_body("u", 200, "null").unwrap(), None);
}

#[test]
fn non_success_status_is_an_error() {
    let err = parse_record_body("http://h/x", 404, r#"{"error": "No record found"}"#).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("404"));

    let err = parse_record_body("http://h/x", 403, "").unwrap_err();
    assert!(matches!(err, AutofillError::Status { status: 403, .. }));
    assert!(!err.is_not_found());
}

#[test]
fn non_object_body_is_malformed() {
    for body in ["[1,2]", "\"text\"", "<html>", "42"] {
        let err = parse_record_body("u", 200, body).unwrap_err();
        assert!(
            matches!(err, AutofillError::MalformedBody { .. }),
            "{} should be malformed",
            body
        );
    }
}

// =========================================================================
// Record
// =========================================================================

#[test]
fn record_pk_ignores_falsy_values() {
    assert_eq!(Record::new().with_field(PK_FIELD, "").pk(), None);
    assert_eq!(Record::new().with_field(PK_FIELD, json!(null)).pk(), None);
    assert_eq!(Record::new().pk(), None);
    assert_eq!(Record::new().with_field(PK_FIELD, "a1").pk().as_deref(), Some("a1"));
}

#[test]
fn metadata_keys_start_with_underscore() {
    assert!(is_metadata_key("_pk"));
    assert!(is_metadata_key("_anything"));
    assert!(!is_metadata_key("pk"));
    assert!(!is_metadata_key("field_"));
}
