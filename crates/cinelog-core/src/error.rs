use thiserror::Error;

/// Errors from cinelog-core (config and token persistence).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config error: {0}")]
    Config(String),

    #[error("token store error: {0}")]
    TokenStore(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
