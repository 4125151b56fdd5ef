//! Shared domain types for cinelog: watchlist models, the auth session,
//! and application configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use error::CoreError;
pub use session::Session;
