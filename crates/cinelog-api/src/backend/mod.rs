mod client;
mod error;
mod types;

pub use client::BackendClient;
pub use error::BackendError;
pub use types::AuthTokenData;
