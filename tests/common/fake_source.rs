use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use microsys_autofill::{
    api::{client::RecordSource, record::Record},
    error::AutofillError,
    form::form_model::FormContext,
};

/// What the fake last-entry endpoint answers.
pub enum Newest {
    Found(Record),
    Empty,
    Fails(u16),
}

/// In-memory stand-in for the two record endpoints that counts its calls.
pub struct FakeSource {
    pub newest: Newest,
    pub records: HashMap<String, Record>,
    pub details_status: Option<u16>,
    pub last_entry_calls: Cell<usize>,
    pub details_calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new(newest: Newest) -> Self {
        FakeSource {
            newest,
            records: HashMap::new(),
            details_status: None,
            last_entry_calls: Cell::new(0),
            details_calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_record(mut self, pk: &str, record: Record) -> Self {
        self.records.insert(pk.to_string(), record);
        self
    }

    /// Make every details request fail with `status`.
    pub fn failing_details(mut self, status: u16) -> Self {
        self.details_status = Some(status);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.last_entry_calls.get() + self.details_calls.borrow().len()
    }
}

impl RecordSource for FakeSource {
    fn last_entry(
        &self,
        context: &FormContext,
        _before_id: Option<&str>,
    ) -> Result<Option<Record>, AutofillError> {
        self.last_entry_calls.set(self.last_entry_calls.get() + 1);
        match &self.newest {
            Newest::Found(record) => Ok(Some(record.clone())),
            Newest::Empty => Ok(None),
            Newest::Fails(status) => Err(AutofillError::Status {
                url: format!("fake://last-entry/{}", context),
                status: *status,
            }),
        }
    }

    fn details(&self, context: &FormContext, pk: &str) -> Result<Record, AutofillError> {
        self.details_calls.borrow_mut().push(pk.to_string());
        let url = format!("fake://details/{}/{}", context, pk);
        if let Some(status) = self.details_status {
            return Err(AutofillError::Status { url, status });
        }
        self.records
            .get(pk)
            .cloned()
            .ok_or(AutofillError::Status { url, status: 404 })
    }
}
