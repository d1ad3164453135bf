use thiserror::Error;

#[derive(Debug, Error)]
pub enum NBNError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Non-JSON response: {0}")]
    NonJsonResponse(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown pivot method '{0}' (expected classic, woodie, camarilla, demark or fibonacci)")]
    UnknownPivotMethod(String),

    #[error("Invalid value for limit: {0} (expected 1-100)")]
    InvalidLimit(usize),

    #[error("Record not found: {0}")]
    MissingRecord(String),

    #[error("Invalid option parameters: {0}")]
    InvalidOptionParams(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for NBNError {
    fn from(err: reqwest::Error) -> Self {
        NBNError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for NBNError {
    fn from(err: serde_json::Error) -> Self {
        NBNError::Parse(err.to_string())
    }
}
