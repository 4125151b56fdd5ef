mod client;
mod error;
mod types;

pub use client::{TmdbClient, ALLOWED_LANGUAGES};
pub use error::TmdbError;
pub use types::{CastMember, Genre, Language, MediaDetail, MediaSummary, Video};
