/// Errors raised at the page evaluation boundary.
///
/// These never cross the channel-selection boundary: strategies turn them
/// into a `SelectorResult::Failure` carrying the message.
#[derive(thiserror::Error, Debug, Clone)]
pub enum PageError {
    #[error("Script execution error: {0}")]
    ScriptError(String),

    #[error("Unexpected result for query '{query}': {detail}")]
    UnexpectedResult { query: String, detail: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Input dispatch failed: {0}")]
    Input(String),

    #[error("Timeout: {operation}")]
    Timeout { operation: String },
}

impl From<serde_json::Error> for PageError {
    fn from(e: serde_json::Error) -> Self {
        PageError::Serialization(e.to_string())
    }
}
