use microsys_autofill::{
    api::record::Record,
    autofill::{
        coerce::{control_value, parse_leading_int, target_id, truthy},
        populate::{
            FieldOutcome, IncrementOutcome, bump_sequence, clear_form, pick_sequence_control,
            populate_form,
        },
    },
    form::{
        control::{ControlKind, FormControl},
        form_model::Form,
    },
};
use serde_json::json;

use crate::common::utils::{shipment_form, shipment_record};

mod common;

// =========================================================================
// Value coercion
// =========================================================================

#[test]
fn control_value_follows_browser_string_conversion() {
    assert_eq!(control_value(&json!("abc")), "abc");
    assert_eq!(control_value(&json!(5)), "5");
    assert_eq!(control_value(&json!(5.0)), "5");
    assert_eq!(control_value(&json!(2.5)), "2.5");
    assert_eq!(control_value(&json!(-0.0)), "0");
    assert_eq!(control_value(&json!(true)), "true");
    assert_eq!(control_value(&json!(null)), "");
    assert_eq!(control_value(&json!([1, "a", null])), "1,a,");
    assert_eq!(control_value(&json!({"a": 1})), "[object Object]");
}

#[test]
fn truthiness_matches_javascript() {
    for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
        assert!(!truthy(&falsy), "{} should be falsy", falsy);
    }
    for truthy_value in [json!(true), json!(1), json!("0"), json!([]), json!({})] {
        assert!(truthy(&truthy_value), "{} should be truthy", truthy_value);
    }
}

#[test]
fn target_id_rejects_falsy_keys() {
    assert_eq!(target_id(&json!(7)), Some("7".to_string()));
    assert_eq!(target_id(&json!("abc")), Some("abc".to_string()));
    assert_eq!(target_id(&json!("")), None);
    assert_eq!(target_id(&json!(null)), None);
}

#[test]
fn parse_leading_int_behaves_like_parse_int() {
    assert_eq!(parse_leading_int("5"), Some(5));
    assert_eq!(parse_leading_int("  12abc"), Some(12));
    assert_eq!(parse_leading_int("3.9"), Some(3));
    assert_eq!(parse_leading_int("-4"), Some(-4));
    assert_eq!(parse_leading_int("+8"), Some(8));
    assert_eq!(parse_leading_int(""), None);
    assert_eq!(parse_leading_int("abc"), None);
    assert_eq!(parse_leading_int("-"), None);
    assert_eq!(parse_leading_int("99999999999999999999"), None);
}

#[test]
fn parse_leading_int_covers_the_full_i64_range() {
    assert_eq!(parse_leading_int("-9223372036854775808"), Some(i64::MIN));
    assert_eq!(parse_leading_int("9223372036854775807"), Some(i64::MAX));
    assert_eq!(parse_leading_int("-9223372036854775809"), None);
    assert_eq!(parse_leading_int("9223372036854775808"), None);
}

// =========================================================================
// Field population
// =========================================================================

#[test]
fn populate_writes_each_kind_of_control() {
    let mut form = shipment_form();
    let report = populate_form(&mut form, &shipment_record("7"));

    assert_eq!(form.value_of("title"), Some("Foo"));
    assert_eq!(form.value_of("carrier"), Some("3"));
    assert_eq!(form.value_of("notes"), Some("handle with care"));
    assert!(form.control("fragile").unwrap().checked);
    assert_eq!(form.value_of("qty_number"), Some("6"));

    assert_eq!(report.outcome_for("_pk"), Some(&FieldOutcome::Metadata));
    assert_eq!(
        report.outcome_for("fragile"),
        Some(&FieldOutcome::Checked { checked: true })
    );
    assert_eq!(report.applied_count(), 5);
}

#[test]
fn change_notifications_follow_each_write_then_the_increment() {
    let mut form = shipment_form();
    populate_form(&mut form, &shipment_record("7"));

    assert_eq!(
        form.changes,
        vec!["title", "qty_number", "fragile", "carrier", "notes", "qty_number"]
    );
}

#[test]
fn missing_control_is_skipped_without_affecting_other_fields() {
    let mut form = Form::new("inventory", "shipment")
        .with_control(FormControl::input("text", "title"));
    let record = Record::new()
        .with_field("ghost", "boo")
        .with_field("title", "Foo");

    let report = populate_form(&mut form, &record);

    assert_eq!(report.outcome_for("ghost"), Some(&FieldOutcome::NoControl));
    assert_eq!(form.value_of("title"), Some("Foo"));
    assert_eq!(form.changes, vec!["title"]);
}

#[test]
fn any_underscore_key_is_metadata() {
    let mut form = Form::new("a", "b").with_control(FormControl::input("text", "_meta"));
    let record = Record::new().with_field("_meta", "x");

    let report = populate_form(&mut form, &record);

    assert_eq!(report.outcome_for("_meta"), Some(&FieldOutcome::Metadata));
    assert_eq!(form.value_of("_meta"), Some(""));
}

#[test]
fn checkbox_takes_truthiness_of_value() {
    let mut form = Form::new("a", "b")
        .with_control(FormControl::input("checkbox", "active").with_checked(true));
    populate_form(&mut form, &Record::new().with_field("active", 0));
    assert!(!form.control("active").unwrap().checked);

    populate_form(&mut form, &Record::new().with_field("active", "yes"));
    assert!(form.control("active").unwrap().checked);
}

#[test]
fn radio_is_reported_unsupported_and_untouched() {
    let mut form = Form::new("a", "b")
        .with_control(FormControl::input("radio", "size").with_value("small"));

    let report = populate_form(&mut form, &Record::new().with_field("size", "large"));

    assert_eq!(
        report.outcome_for("size"),
        Some(&FieldOutcome::Unsupported {
            kind: ControlKind::Radio
        })
    );
    let radio = form.control("size").unwrap();
    assert_eq!(radio.value, "small");
    assert!(!radio.checked);
    assert!(form.changes.is_empty());
}

#[test]
fn first_control_with_matching_name_wins() {
    let mut form = Form::new("a", "b")
        .with_control(FormControl::input("text", "dup"))
        .with_control(FormControl::input("text", "dup"));

    populate_form(&mut form, &Record::new().with_field("dup", "x"));

    assert_eq!(form.controls[0].value, "x");
    assert_eq!(form.controls[1].value, "");
}

// =========================================================================
// Auto-increment
// =========================================================================

#[test]
fn sequence_hint_beats_document_order() {
    let controls = vec![
        FormControl::input("number", "weight"),
        FormControl::input("number", "invoice_sequence"),
        FormControl::input("number", "box_number"),
    ];
    assert_eq!(pick_sequence_control(&controls), Some(1));
}

#[test]
fn first_numeric_control_is_the_fallback() {
    let controls = vec![
        FormControl::input("text", "number_as_text"),
        FormControl::input("number", "weight"),
        FormControl::input("number", "height"),
    ];
    assert_eq!(pick_sequence_control(&controls), Some(1));
}

#[test]
fn hint_match_is_case_sensitive() {
    let controls = vec![
        FormControl::input("number", "weight"),
        FormControl::input("number", "Serial_Number"),
    ];
    assert_eq!(pick_sequence_control(&controls), Some(0));
}

#[test]
fn no_numeric_control_skips_increment() {
    let mut form = Form::new("a", "b").with_control(FormControl::input("text", "number"));
    assert_eq!(bump_sequence(&mut form), IncrementOutcome::NoNumericControl);
    assert!(form.changes.is_empty());
}

#[test]
fn non_numeric_value_is_left_untouched() {
    let mut form = Form::new("a", "b")
        .with_control(FormControl::input("number", "seq_number").with_value("abc"));

    assert_eq!(
        bump_sequence(&mut form),
        IncrementOutcome::NotANumber {
            name: "seq_number".into(),
            value: "abc".into()
        }
    );
    assert_eq!(form.value_of("seq_number"), Some("abc"));
    assert!(form.changes.is_empty());
}

#[test]
fn leading_integer_is_incremented() {
    let mut form = Form::new("a", "b")
        .with_control(FormControl::input("number", "seq").with_value("7abc"));

    bump_sequence(&mut form);

    assert_eq!(form.value_of("seq"), Some("8"));
    assert_eq!(form.changes, vec!["seq"]);
}

// =========================================================================
// Clearing
// =========================================================================

#[test]
fn clear_skips_hidden_submit_and_token() {
    let mut form = shipment_form()
        .with_control(FormControl::input("radio", "size").with_checked(true))
        .with_control(FormControl::input("text", "csrfmiddlewaretoken").with_value("tok2"));
    populate_form(&mut form, &shipment_record("1"));
    form.changes.clear();

    let cleared = clear_form(&mut form);

    assert_eq!(cleared, 6);
    assert_eq!(form.value_of("title"), Some(""));
    assert!(!form.control("size").unwrap().checked);
    assert!(!form.control("fragile").unwrap().checked);
    assert_eq!(form.value_of("save"), Some("Save"));
    assert_eq!(form.controls.last().unwrap().value, "tok2");
    assert_eq!(form.changes.len(), 6);
}

#[test]
fn control_kind_classification() {
    assert_eq!(FormControl::input("NUMBER", "n").kind(), ControlKind::Number);
    assert_eq!(FormControl::input("email", "e").kind(), ControlKind::Text);
    assert_eq!(FormControl::select("s").kind(), ControlKind::Select);
    assert_eq!(FormControl::textarea("t").kind(), ControlKind::TextArea);

    let bare = FormControl {
        tag: "input".into(),
        input_type: None,
        name: "x".into(),
        value: String::new(),
        checked: false,
    };
    assert_eq!(bare.kind(), ControlKind::Text);
}
