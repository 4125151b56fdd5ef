use serde::{Deserialize, Serialize};

/// A saved watchlist entry as stored by the backend.
///
/// `id` is assigned server-side and never changes; `name` and
/// `description` are required, the rest is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, rename = "posterUrl")]
    pub poster_url: Option<String>,
}

/// Poster image content attached to an add/update request.
#[derive(Debug, Clone)]
pub struct PosterFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The editable fields of a watchlist entry, used for add and update.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub link: Option<String>,
    pub genre: Option<String>,
    pub poster: Option<PosterFile>,
}

impl ItemDraft {
    /// Client-side validation of required fields, checked before any
    /// request is built. The backend revalidates regardless.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".into());
        }
        if self.description.trim().is_empty() {
            return Err("description is required".into());
        }
        Ok(())
    }
}

/// Transient client-side query over the watchlist. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub name: Option<String>,
    pub genre: Option<String>,
}

impl ItemFilter {
    /// Query parameters for `GET /movies`; empty fields are omitted so an
    /// empty filter fetches the unfiltered set.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(name) = self.name.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("name", name.to_string()));
        }
        if let Some(genre) = self.genre.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("genre", genre.to_string()));
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}

/// Media category on the metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub const ALL: &[MediaKind] = &[Self::Movie, Self::Tv];

    /// Path segment used by the TMDB API.
    pub fn as_path_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie => write!(f, "Movie"),
            Self::Tv => write!(f, "TV"),
        }
    }
}

/// Trending aggregation window on the metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendWindow {
    Day,
    #[default]
    Week,
}

impl TrendWindow {
    pub fn as_path_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_omits_empty_fields() {
        let filter = ItemFilter {
            name: Some("Inception".into()),
            genre: Some("".into()),
        };
        assert_eq!(filter.to_query(), vec![("name", "Inception".to_string())]);

        let empty = ItemFilter::default();
        assert!(empty.is_empty());
        assert!(empty.to_query().is_empty());
    }

    #[test]
    fn test_draft_validation() {
        let draft = ItemDraft {
            name: "Dune".into(),
            description: "Sci-fi epic".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        let missing = ItemDraft {
            name: "  ".into(),
            description: "x".into(),
            ..Default::default()
        };
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_item_deserializes_with_missing_optionals() {
        let json = r#"{"id": 7, "name": "Dune", "description": "Sci-fi epic"}"#;
        let item: WatchlistItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert!(item.link.is_none());
        assert!(item.poster_url.is_none());
    }
}
