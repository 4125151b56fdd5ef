use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;

use cinelog_core::models::{ItemDraft, ItemFilter, WatchlistItem};
use cinelog_core::Session;

use super::error::BackendError;
use super::types::{AuthTokenData, LoginRequest, RegisterRequest};
use crate::envelope::ApiResponse;

/// Client for the cinelog REST backend.
///
/// Holds an injected [`Session`]: the bearer token is attached to every
/// request when present, and any 401 response clears the session before
/// the error is surfaced. Absence of a token is never rejected here;
/// the backend is the authority.
pub struct BackendClient {
    base_url: String,
    session: Session,
    http: Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            session,
            http: Client::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.current_token() {
            Some(token) => req.header("Authorization", format!("Bearer {token}")),
            None => req,
        }
    }

    /// Check status and unwrap the `{success, message, data}` envelope.
    ///
    /// A 401 tears down the session here, regardless of which endpoint
    /// produced it. Expected failures arrive as `success: false` (the
    /// backend also wraps its error statuses in the envelope, so a
    /// non-2xx body is given a chance to parse as one).
    async fn read_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<ApiResponse<T>, BackendError> {
        let status = resp.status();
        if status.as_u16() == 401 {
            tracing::warn!("backend rejected credentials; clearing session");
            self.session.logout();
            return Err(BackendError::Unauthorized);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body) {
                if !envelope.success {
                    return Err(BackendError::Rejected(envelope.user_message()));
                }
            }
            tracing::warn!(status = status.as_u16(), "backend API error");
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: ApiResponse<T> = resp
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        if !envelope.success {
            return Err(BackendError::Rejected(envelope.user_message()));
        }
        Ok(envelope)
    }

    async fn expect_data<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, BackendError> {
        let envelope = self.read_envelope::<T>(resp).await?;
        envelope
            .data
            .ok_or_else(|| BackendError::Parse("missing data in successful response".into()))
    }

    async fn expect_ack(&self, resp: reqwest::Response) -> Result<(), BackendError> {
        self.read_envelope::<serde_json::Value>(resp).await?;
        Ok(())
    }

    // ── Auth ────────────────────────────────────────────────────

    /// Exchange credentials for a bearer token. The caller decides what
    /// to do with it (normally `Session::login`).
    pub async fn login(&self, email: &str, password: &str) -> Result<String, BackendError> {
        let resp = self
            .with_auth(self.http.post(self.url("/auth/login")))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let data: AuthTokenData = self.expect_data(resp).await?;
        Ok(data.token)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), BackendError> {
        let resp = self
            .with_auth(self.http.post(self.url("/auth/register")))
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .send()
            .await?;

        self.expect_ack(resp).await
    }

    // ── Watchlist CRUD ──────────────────────────────────────────

    /// Fetch the user's watchlist; empty filter fields are omitted so an
    /// empty filter returns the unfiltered set.
    pub async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<WatchlistItem>, BackendError> {
        let resp = self
            .with_auth(self.http.get(self.url("/movies")))
            .query(&filter.to_query())
            .send()
            .await?;

        self.expect_data(resp).await
    }

    pub async fn get_item(&self, id: i64) -> Result<WatchlistItem, BackendError> {
        let resp = self
            .with_auth(self.http.get(self.url(&format!("/movies/{id}"))))
            .send()
            .await?;

        self.expect_data(resp).await
    }

    pub async fn add_item(&self, draft: &ItemDraft) -> Result<WatchlistItem, BackendError> {
        draft.validate().map_err(BackendError::Invalid)?;
        let req = self.with_auth(self.http.post(self.url("/movies")));
        let resp = Self::attach_draft(req, draft).send().await?;
        self.expect_data(resp).await
    }

    /// Full replace of the editable fields. The id is immutable.
    pub async fn update_item(
        &self,
        id: i64,
        draft: &ItemDraft,
    ) -> Result<WatchlistItem, BackendError> {
        draft.validate().map_err(BackendError::Invalid)?;
        let req = self.with_auth(self.http.put(self.url(&format!("/movies/{id}"))));
        let resp = Self::attach_draft(req, draft).send().await?;
        self.expect_data(resp).await
    }

    pub async fn delete_item(&self, id: i64) -> Result<(), BackendError> {
        let resp = self
            .with_auth(self.http.delete(self.url(&format!("/movies/{id}"))))
            .send()
            .await?;

        self.expect_ack(resp).await
    }

    /// Encode the draft: multipart when a poster is attached, plain JSON
    /// otherwise. Optional fields are included only when non-empty.
    fn attach_draft(req: reqwest::RequestBuilder, draft: &ItemDraft) -> reqwest::RequestBuilder {
        match &draft.poster {
            Some(poster) => {
                let mut form = Form::new()
                    .text("name", draft.name.clone())
                    .text("description", draft.description.clone());
                if let Some(link) = draft.link.as_deref().filter(|s| !s.is_empty()) {
                    form = form.text("link", link.to_string());
                }
                if let Some(genre) = draft.genre.as_deref().filter(|s| !s.is_empty()) {
                    form = form.text("genre", genre.to_string());
                }
                form = form.part(
                    "poster",
                    Part::bytes(poster.bytes.clone()).file_name(poster.file_name.clone()),
                );
                req.multipart(form)
            }
            None => {
                let mut body = serde_json::Map::new();
                body.insert("name".into(), draft.name.clone().into());
                body.insert("description".into(), draft.description.clone().into());
                if let Some(link) = draft.link.as_deref().filter(|s| !s.is_empty()) {
                    body.insert("link".into(), link.into());
                }
                if let Some(genre) = draft.genre.as_deref().filter(|s| !s.is_empty()) {
                    body.insert("genre".into(), genre.into());
                }
                req.json(&serde_json::Value::Object(body))
            }
        }
    }
}
