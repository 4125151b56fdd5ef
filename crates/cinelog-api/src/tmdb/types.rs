use serde::Deserialize;

// TMDB names fields differently per media kind: movies carry `title` and
// `release_date`, TV shows `name` and `first_air_date`. The projections
// keep both and normalize through accessors.

/// One title in a listing (trending, popular, discover, search).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaSummary {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
}

impl MediaSummary {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .filter(|d| d.len() >= 4)
            .map(|d| &d[..4])
    }
}

/// Full detail view of one title.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaDetail {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f32>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    pub number_of_seasons: Option<u32>,
}

impl MediaDetail {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Spoken-language entry from the upstream configuration endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub iso_639_1: String,
    pub english_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Video {
    /// The detail view only embeds YouTube trailers.
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && self.kind == "Trailer"
    }
}

// ── Wire pages ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ResultsPage<T> {
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreList {
    pub genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// Error body shape TMDB uses for failed calls.
#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamStatus {
    pub status_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_movie_summary() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "overview": "Cobb, a skilled thief...",
            "poster_path": "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
            "vote_average": 8.4,
            "release_date": "2010-07-15"
        }"#;
        let summary: MediaSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.display_title(), "Inception");
        assert_eq!(summary.release_year(), Some("2010"));
    }

    #[test]
    fn test_tv_summary_falls_back_to_name() {
        let json = r#"{"id": 1399, "name": "Game of Thrones", "first_air_date": "2011-04-17"}"#;
        let summary: MediaSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.display_title(), "Game of Thrones");
        assert_eq!(summary.release_year(), Some("2011"));
    }

    #[test]
    fn test_trailer_filter() {
        let trailer = Video {
            key: "YoHD9XEInc0".into(),
            name: "Official Trailer".into(),
            site: "YouTube".into(),
            kind: "Trailer".into(),
        };
        assert!(trailer.is_youtube_trailer());

        let featurette = Video {
            kind: "Featurette".into(),
            ..trailer.clone()
        };
        assert!(!featurette.is_youtube_trailer());
    }

    #[test]
    fn test_deserialize_detail_with_genres() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "tagline": "Your mind is the scene of the crime.",
            "runtime": 148,
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]
        }"#;
        let detail: MediaDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.genres.len(), 2);
        assert_eq!(detail.genres[1].name, "Science Fiction");
        assert_eq!(detail.runtime, Some(148));
        assert!(detail.number_of_seasons.is_none());
    }
}
