use thiserror::Error;

/// Why a weather lookup produced no report.
///
/// The `Display` text is the message printed for the user; every variant maps
/// to the same `failure` token in the action output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a usable HTTP response: connection, DNS,
    /// timeout, or a 4xx/5xx status.
    #[error("Error fetching data: {0}")]
    Transport(String),

    /// HTTP succeeded but the body carries a non-200 application status.
    #[error("Error: {0}")]
    Upstream(String),

    /// The body could not be read as the expected JSON document.
    #[error("Error parsing response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key in its query string.
        FetchError::Transport(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedResponse(err.to_string())
    }
}
