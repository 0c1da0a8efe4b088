use microsys_autofill::{
    api::record::Record,
    form::{
        control::FormControl,
        form_model::{Form, FormContext, PageSnapshot},
    },
};

pub fn context() -> FormContext {
    FormContext::new("inventory", "shipment").unwrap()
}

/// A shipment creation form with one control of each interesting kind.
pub fn shipment_form() -> Form {
    Form::new("inventory", "shipment")
        .with_control(FormControl::input("hidden", "csrfmiddlewaretoken").with_value("tok"))
        .with_control(FormControl::input("text", "title"))
        .with_control(FormControl::input("number", "qty_number"))
        .with_control(FormControl::input("checkbox", "fragile"))
        .with_control(FormControl::select("carrier"))
        .with_control(FormControl::textarea("notes"))
        .with_control(FormControl::input("submit", "save").with_value("Save"))
}

pub fn shipment_page() -> PageSnapshot {
    PageSnapshot::new(shipment_form())
}

pub fn shipment_record(pk: &str) -> Record {
    Record::new()
        .with_field("_pk", pk)
        .with_field("title", "Foo")
        .with_field("qty_number", "5")
        .with_field("fragile", true)
        .with_field("carrier", 3)
        .with_field("notes", "handle with care")
}
