use tokio_util::sync::CancellationToken;

use cinelog_api::backend::BackendClient;
use cinelog_core::models::{ItemDraft, ItemFilter, WatchlistItem};

/// Lifecycle of the watchlist view: `Idle` until the first load, then
/// `Loading` on every explicit load, filter submit, or retry.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<WatchlistItem>),
    Failed(String),
}

/// View-model orchestrating the watchlist against the backend client.
///
/// Mutations follow the mutation-then-navigate contract: `add` and
/// `update` do not merge results into local state, the list is reloaded
/// on the next view mount. `remove` is the exception and prunes in
/// place.
pub struct WatchlistModel {
    client: BackendClient,
    filter: ItemFilter,
    state: ListState,
}

impl WatchlistModel {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            filter: ItemFilter::default(),
            state: ListState::Idle,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn filter(&self) -> &ItemFilter {
        &self.filter
    }

    /// Fetch the list for `filter`, transitioning
    /// `Loading -> Loaded | Failed`. When `cancel` fires first (the view
    /// was torn down), the previous state is restored and the in-flight
    /// response is dropped.
    pub async fn load(&mut self, filter: ItemFilter, cancel: &CancellationToken) {
        self.filter = filter;
        let previous = std::mem::replace(&mut self.state, ListState::Loading);

        if cancel.is_cancelled() {
            self.state = previous;
            return;
        }

        let client = &self.client;
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("watchlist load cancelled");
                self.state = previous;
                return;
            }
            result = client.list_items(&self.filter) => result,
        };

        self.state = match result {
            Ok(items) => ListState::Loaded(items),
            Err(e) => {
                tracing::warn!("watchlist load failed: {e}");
                ListState::Failed(e.user_message())
            }
        };
    }

    /// Manual retry: re-invoke the last load with the same filter.
    pub async fn retry(&mut self, cancel: &CancellationToken) {
        let filter = self.filter.clone();
        self.load(filter, cancel).await;
    }

    /// Create an entry. On success the caller is expected to navigate
    /// away; the new item shows up on the next load.
    pub async fn add(&self, draft: &ItemDraft) -> Result<WatchlistItem, String> {
        self.client.add_item(draft).await.map_err(|e| e.user_message())
    }

    /// Replace the editable fields of an entry. Same navigation contract
    /// as [`add`](Self::add).
    pub async fn update(&self, id: i64, draft: &ItemDraft) -> Result<WatchlistItem, String> {
        self.client
            .update_item(id, draft)
            .await
            .map_err(|e| e.user_message())
    }

    /// Delete an entry. On success it is pruned from local state without
    /// a full reload; on failure state is left untouched and the message
    /// is returned.
    pub async fn remove(&mut self, id: i64, cancel: &CancellationToken) -> Result<(), String> {
        let result = tokio::select! {
            _ = cancel.cancelled() => return Err("cancelled".into()),
            result = self.client.delete_item(id) => result,
        };

        match result {
            Ok(()) => {
                if let ListState::Loaded(items) = &mut self.state {
                    items.retain(|item| item.id != id);
                }
                Ok(())
            }
            Err(e) => Err(e.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinelog_core::session::MemoryTokenStore;
    use cinelog_core::Session;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn model(server: &MockServer) -> WatchlistModel {
        let session = Session::new(MemoryTokenStore::default());
        session.login("tok");
        WatchlistModel::new(BackendClient::new(server.uri(), session))
    }

    fn list_body(items: serde_json::Value) -> serde_json::Value {
        serde_json::json!({"success": true, "message": "User's watchlist", "data": items})
    }

    #[tokio::test]
    async fn test_load_transitions_to_loaded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_body(serde_json::json!([
                {"id": 1, "name": "Dune", "description": "Sci-fi epic"},
                {"id": 2, "name": "Heat", "description": "Crime drama"}
            ]))))
            .mount(&server)
            .await;

        let mut model = model(&server);
        assert_eq!(*model.state(), ListState::Idle);

        model
            .load(ItemFilter::default(), &CancellationToken::new())
            .await;
        match model.state() {
            ListState::Loaded(items) => assert_eq!(items.len(), 2),
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_failure_stores_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movies"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut model = model(&server);
        model
            .load(ItemFilter::default(), &CancellationToken::new())
            .await;
        match model.state() {
            ListState::Failed(msg) => assert!(!msg.is_empty()),
            other => panic!("expected Failed, got {other:?}"),
        }

        // Manual retry re-enters the load path with the same filter.
        model.retry(&CancellationToken::new()).await;
        assert!(matches!(model.state(), ListState::Failed(_)));
    }

    #[tokio::test]
    async fn test_cancelled_load_restores_previous_state() {
        let server = MockServer::start().await;
        let mut model = model(&server);

        let cancel = CancellationToken::new();
        cancel.cancel();
        model.load(ItemFilter::default(), &cancel).await;
        assert_eq!(*model.state(), ListState::Idle);
    }

    #[tokio::test]
    async fn test_remove_prunes_in_place() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_body(serde_json::json!([
                {"id": 1, "name": "Dune", "description": "Sci-fi epic"},
                {"id": 2, "name": "Heat", "description": "Crime drama"}
            ]))))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/movies/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"success": true, "message": "Movie deleted"}),
            ))
            .mount(&server)
            .await;

        let mut model = model(&server);
        let cancel = CancellationToken::new();
        model.load(ItemFilter::default(), &cancel).await;

        model.remove(1, &cancel).await.unwrap();
        match model.state() {
            ListState::Loaded(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].id, 2);
            }
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_remove_leaves_state_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_body(
                serde_json::json!([{"id": 1, "name": "Dune", "description": "Sci-fi epic"}]),
            )))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/movies/999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(
                serde_json::json!({"success": false, "message": "Movie not found"}),
            ))
            .mount(&server)
            .await;

        let mut model = model(&server);
        let cancel = CancellationToken::new();
        model.load(ItemFilter::default(), &cancel).await;

        let err = model.remove(999, &cancel).await.unwrap_err();
        assert_eq!(err, "Movie not found");
        match model.state() {
            ListState::Loaded(items) => assert_eq!(items.len(), 1),
            other => panic!("expected Loaded, got {other:?}"),
        }
    }
}
