use reqwest::Client;
use serde::de::DeserializeOwned;

use cinelog_core::config::TmdbConfig;
use cinelog_core::models::{MediaKind, TrendWindow};

use super::error::TmdbError;
use super::types::{
    CastMember, CreditsResponse, Genre, GenreList, Language, MediaDetail, MediaSummary,
    ResultsPage, UpstreamStatus, Video,
};

/// Language names surfaced to the user; everything else the upstream
/// configuration endpoint returns is dropped.
pub const ALLOWED_LANGUAGES: &[&str] = &["English", "Hindi", "Telugu"];

/// Read-only client for the TMDB metadata API.
///
/// Stateless: every call is an independent GET keyed by the API key
/// query parameter. No caching, no pagination beyond the first page,
/// no rate-limit handling.
pub struct TmdbClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Self {
        let mut base_url = config.base_url.clone();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key: config.api_key.clone(),
            http: Client::new(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        let resp = self
            .http
            .get(format!("{}{path}", self.base_url))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<UpstreamStatus>(&body)
                .ok()
                .and_then(|s| s.status_message)
                .unwrap_or_default();
            tracing::warn!(status, "TMDB API error");
            return Err(TmdbError::Api { status, message });
        }

        resp.json().await.map_err(|e| TmdbError::Parse(e.to_string()))
    }

    async fn get_page(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<MediaSummary>, TmdbError> {
        let page: ResultsPage<MediaSummary> = self.get(path, params).await?;
        Ok(page.results)
    }

    pub async fn trending(
        &self,
        kind: MediaKind,
        window: TrendWindow,
    ) -> Result<Vec<MediaSummary>, TmdbError> {
        self.get_page(
            &format!("/trending/{}/{}", kind.as_path_str(), window.as_path_str()),
            &[],
        )
        .await
    }

    pub async fn popular(&self, kind: MediaKind) -> Result<Vec<MediaSummary>, TmdbError> {
        self.get_page(&format!("/{}/popular", kind.as_path_str()), &[])
            .await
    }

    pub async fn genres(&self, kind: MediaKind) -> Result<Vec<Genre>, TmdbError> {
        let list: GenreList = self
            .get(&format!("/genre/{}/list", kind.as_path_str()), &[])
            .await?;
        Ok(list.genres)
    }

    /// Spoken languages, filtered down to [`ALLOWED_LANGUAGES`].
    pub async fn languages(&self) -> Result<Vec<Language>, TmdbError> {
        let all: Vec<Language> = self.get("/configuration/languages", &[]).await?;
        Ok(all
            .into_iter()
            .filter(|lang| ALLOWED_LANGUAGES.contains(&lang.english_name.as_str()))
            .collect())
    }

    pub async fn discover_by_genre(
        &self,
        kind: MediaKind,
        genre_id: u64,
    ) -> Result<Vec<MediaSummary>, TmdbError> {
        self.get_page(
            &format!("/discover/{}", kind.as_path_str()),
            &[("with_genres", &genre_id.to_string())],
        )
        .await
    }

    pub async fn discover_by_language(
        &self,
        kind: MediaKind,
        lang_code: &str,
    ) -> Result<Vec<MediaSummary>, TmdbError> {
        self.get_page(
            &format!("/discover/{}", kind.as_path_str()),
            &[("with_original_language", lang_code)],
        )
        .await
    }

    pub async fn search(
        &self,
        kind: MediaKind,
        query: &str,
    ) -> Result<Vec<MediaSummary>, TmdbError> {
        self.get_page(
            &format!("/search/{}", kind.as_path_str()),
            &[("query", query)],
        )
        .await
    }

    pub async fn details(&self, kind: MediaKind, id: u64) -> Result<MediaDetail, TmdbError> {
        self.get(&format!("/{}/{id}", kind.as_path_str()), &[]).await
    }

    pub async fn credits(&self, kind: MediaKind, id: u64) -> Result<Vec<CastMember>, TmdbError> {
        let credits: CreditsResponse = self
            .get(&format!("/{}/{id}/credits", kind.as_path_str()), &[])
            .await?;
        Ok(credits.cast)
    }

    pub async fn videos(&self, kind: MediaKind, id: u64) -> Result<Vec<Video>, TmdbError> {
        let page: ResultsPage<Video> = self
            .get(&format!("/{}/{id}/videos", kind.as_path_str()), &[])
            .await?;
        Ok(page.results)
    }
}
