use thiserror::Error;

/// Errors from the cinelog backend client.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Required fields missing, caught before any request is sent.
    #[error("invalid input: {0}")]
    Invalid(String),

    /// Transport-level failure: no response was received.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned 401; the session has already been cleared.
    #[error("authentication required")]
    Unauthorized,

    /// The backend answered with `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// Non-2xx response outside the envelope contract.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}

impl BackendError {
    /// Text suitable for showing directly to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(msg) | Self::Rejected(msg) => msg.clone(),
            Self::Http(_) => "network error, please try again".into(),
            Self::Unauthorized => "session expired, please log in again".into(),
            Self::Api { .. } | Self::Parse(_) => {
                "something went wrong, please try again".into()
            }
        }
    }

    /// Whether a manual retry of the same call makes sense.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }
}
