use thiserror::Error;

/// Errors from the TMDB metadata client.
///
/// Every failure mode is normalized here so presentation code can show
/// `user_message()` without inspecting transport details.
#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}

impl TmdbError {
    pub fn user_message(&self) -> String {
        match self {
            // Upstream sends a human-readable status_message on errors.
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => "failed to fetch data".into(),
        }
    }
}
