use std::time::Duration;

use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::api::record::Record;
use crate::error::AutofillError;
use crate::form::form_model::FormContext;

/// Cookie Django reads the login session from.
pub const SESSION_COOKIE_NAME: &str = "sessionid";

// ============================================================================
// RecordSource trait - the two read-only autofill endpoints
// ============================================================================

/// Source of template records for a form context.
pub trait RecordSource {
    /// Most recently created record, optionally restricted to records whose
    /// primary key is below `before_id`. `Ok(None)` when the endpoint answers
    /// with an empty body.
    fn last_entry(
        &self,
        context: &FormContext,
        before_id: Option<&str>,
    ) -> Result<Option<Record>, AutofillError>;

    /// Full record for one primary key.
    fn details(&self, context: &FormContext, pk: &str) -> Result<Record, AutofillError>;
}

impl<T: RecordSource + ?Sized> RecordSource for &T {
    fn last_entry(
        &self,
        context: &FormContext,
        before_id: Option<&str>,
    ) -> Result<Option<Record>, AutofillError> {
        (**self).last_entry(context, before_id)
    }

    fn details(&self, context: &FormContext, pk: &str) -> Result<Record, AutofillError> {
        (**self).details(context, pk)
    }
}

// ============================================================================
// Endpoint paths
// ============================================================================

pub fn last_entry_path(context: &FormContext) -> String {
    format!(
        "/sys/api/last-entry/{}/{}/",
        context.app_label, context.model_name
    )
}

pub fn details_path(context: &FormContext, pk: &str) -> String {
    format!(
        "/sys/api/details/{}/{}/{}/",
        context.app_label, context.model_name, pk
    )
}

/// Join a base URL and an absolute endpoint path without doubling slashes.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

// ============================================================================
// Response classification
// ============================================================================

/// Turn a status code and body into a record.
///
/// Non-success statuses are errors. An empty body or a JSON `null` means
/// "nothing found"; any other non-object body is malformed.
pub fn parse_record_body(
    url: &str,
    status: u16,
    body: &str,
) -> Result<Option<Record>, AutofillError> {
    if !(200..300).contains(&status) {
        return Err(AutofillError::Status {
            url: url.to_string(),
            status,
        });
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|e| AutofillError::MalformedBody {
        url: url.to_string(),
        detail: e.to_string(),
    })?;

    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(Record::from_map(map))),
        other => Err(AutofillError::MalformedBody {
            url: url.to_string(),
            detail: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// Fetches records from the application server over HTTP.
pub struct HttpRecordSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpRecordSource {
    /// Build a client for `base_url`.
    ///
    /// `session_cookie` is the value of the `sessionid` cookie; both
    /// endpoints require a logged-in user. `timeout` of `None` waits for as
    /// long as the server takes.
    pub fn new(
        base_url: &str,
        session_cookie: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, AutofillError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Requested-With",
            HeaderValue::from_static("XMLHttpRequest"),
        );
        if let Some(session) = session_cookie {
            let cookie = format!("{}={}", SESSION_COOKIE_NAME, session);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                headers.insert(COOKIE, value);
            } else {
                tracing::warn!("session cookie contains invalid header characters, ignoring it");
            }
        }

        // blocking clients default to a 30s timeout; None disables it
        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(AutofillError::ClientBuild)?;

        Ok(HttpRecordSource {
            base_url: base_url.to_string(),
            client,
        })
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Option<Record>, AutofillError> {
        let url = endpoint_url(&self.base_url, path);
        tracing::debug!(%url, "fetching record");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| AutofillError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| AutofillError::Transport {
            url: url.clone(),
            source: e,
        })?;

        parse_record_body(&url, status, &body)
    }
}

impl RecordSource for HttpRecordSource {
    fn last_entry(
        &self,
        context: &FormContext,
        before_id: Option<&str>,
    ) -> Result<Option<Record>, AutofillError> {
        let path = last_entry_path(context);
        match before_id {
            Some(id) => self.get(&path, &[("before_id", id)]),
            None => self.get(&path, &[]),
        }
    }

    fn details(&self, context: &FormContext, pk: &str) -> Result<Record, AutofillError> {
        let path = details_path(context, pk);
        self.get(&path, &[])?
            .ok_or_else(|| AutofillError::MalformedBody {
                url: endpoint_url(&self.base_url, &path),
                detail: "empty body for a details request".into(),
            })
    }
}
