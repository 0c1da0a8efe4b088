use std::fmt;

#[derive(Debug)]
pub enum AutofillError {
    /// Request never produced a response (connection refused, DNS, timeout)
    Transport { url: String, source: reqwest::Error },

    /// Endpoint answered with a non-success HTTP status
    Status { url: String, status: u16 },

    /// Response body was not the JSON object the endpoint promises
    MalformedBody { url: String, detail: String },

    /// JSON parsing failed (snapshot files, store files)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed
    JsonSerialize { context: String, source: serde_json::Error },

    /// Reading or writing the state store file failed
    StoreIo { path: String, source: std::io::Error },

    /// HTTP client could not be constructed
    ClientBuild(reqwest::Error),
}

impl AutofillError {
    /// Whether the endpoint reported that nothing exists for the request.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AutofillError::Status { status: 404, .. })
    }
}

impl fmt::Display for AutofillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutofillError::Transport { url, source } => {
                write!(f, "Request to {} failed: {}", url, source)
            }
            AutofillError::Status { url, status } => {
                write!(f, "{} answered with HTTP {}", url, status)
            }
            AutofillError::MalformedBody { url, detail } => {
                write!(f, "Unexpected response body from {}: {}", url, detail)
            }
            AutofillError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            AutofillError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            AutofillError::StoreIo { path, source } => {
                write!(f, "State store '{}' I/O error: {}", path, source)
            }
            AutofillError::ClientBuild(source) => {
                write!(f, "Failed to build HTTP client: {}", source)
            }
        }
    }
}

impl std::error::Error for AutofillError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AutofillError::Transport { source, .. } => Some(source),
            AutofillError::JsonParse { source, .. } => Some(source),
            AutofillError::JsonSerialize { source, .. } => Some(source),
            AutofillError::StoreIo { source, .. } => Some(source),
            AutofillError::ClientBuild(source) => Some(source),
            _ => None,
        }
    }
}
