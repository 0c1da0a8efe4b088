use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    autofill::{decision::Target, populate::PopulateReport},
    form::form_model::FormContext,
};

/// One line of the autofill audit log.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub context: String,

    /// Handler or chain stage that emitted the event.
    pub stage: String,

    pub target: Option<String>,
    pub source: Option<String>,

    pub applied_fields: Option<usize>,
    pub increment: Option<String>,

    pub error: Option<String>,
}

impl TraceEvent {
    pub fn now(context: &FormContext, stage: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            context: context.to_string(),
            stage: stage.to_string(),
            target: None,
            source: None,
            applied_fields: None,
            increment: None,
            error: None,
        }
    }

    pub fn with_target(mut self, target: &Target) -> Self {
        self.target = Some(target.id.clone());
        self.source = Some(format!("{:?}", target.source));
        self
    }

    pub fn with_report(mut self, report: &PopulateReport) -> Self {
        self.applied_fields = Some(report.applied_count());
        self.increment = Some(format!("{:?}", report.increment));
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
