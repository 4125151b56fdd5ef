//! The auth session: one bearer token, held in memory and mirrored to a
//! durable store so it survives a restart.
//!
//! The session is an explicit, injectable handle. API clients read it,
//! only `login`/`logout` (and the 401 teardown path, which calls
//! `logout`) write it. Token changes are published on a watch channel so
//! route guards can react immediately.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

const FILE_NAME: &str = "session.json";

/// Durable storage for the bearer token. One key; absent key = logged out.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Token store backed by a small JSON file under the platform data dir
/// (or an explicit path, for tests).
pub struct FileTokenStore {
    path: PathBuf,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct PersistedSession {
    token: String,
}

impl FileTokenStore {
    /// Store at the default platform location (`~/.local/share/cinelog/`
    /// or equivalent).
    pub fn new() -> Self {
        let path = directories::ProjectDirs::from("", "", "cinelog")
            .map(|dirs| dirs.data_dir().join(FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(FILE_NAME));
        Self { path }
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let persisted: PersistedSession = serde_json::from_str(&content).ok()?;
        Some(persisted.token)
    }

    /// Persistence failures are logged, not propagated: the in-memory
    /// session stays valid either way.
    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let persisted = PersistedSession {
            token: token.to_string(),
        };
        match serde_json::to_string(&persisted) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    tracing::warn!("failed to persist session token: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize session token: {e}"),
        }
    }

    fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("failed to remove persisted session: {e}");
            }
        }
    }
}

/// In-memory token store for tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().expect("token store lock").clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().expect("token store lock") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().expect("token store lock") = None;
    }
}

struct SessionInner {
    token: Mutex<Option<String>>,
    store: Box<dyn TokenStore>,
    tx: watch::Sender<Option<String>>,
}

/// Cheaply cloneable handle to the current auth session.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Create a session over the given store, restoring any persisted
    /// token.
    pub fn new(store: impl TokenStore + 'static) -> Self {
        let restored = store.load();
        let (tx, _) = watch::channel(restored.clone());
        Self {
            inner: Arc::new(SessionInner {
                token: Mutex::new(restored),
                store: Box::new(store),
                tx,
            }),
        }
    }

    /// Store the issued token in memory and durably. Always succeeds.
    pub fn login(&self, token: impl Into<String>) {
        let token = token.into();
        self.inner.store.save(&token);
        *self.inner.token.lock().expect("session lock") = Some(token.clone());
        let _ = self.inner.tx.send(Some(token));
        tracing::info!("session established");
    }

    /// Clear the token from memory and durable storage. Idempotent.
    pub fn logout(&self) {
        let mut guard = self.inner.token.lock().expect("session lock");
        if guard.is_none() {
            return;
        }
        *guard = None;
        drop(guard);
        self.inner.store.clear();
        let _ = self.inner.tx.send(None);
        tracing::info!("session cleared");
    }

    /// The current bearer token, if logged in.
    pub fn current_token(&self) -> Option<String> {
        self.inner.token.lock().expect("session lock").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    /// Subscribe to token changes (e.g. logout triggered by a 401).
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.inner.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_then_current_token() {
        let session = Session::new(MemoryTokenStore::default());
        assert!(session.current_token().is_none());

        session.login("abc123");
        assert_eq!(session.current_token().as_deref(), Some("abc123"));

        session.logout();
        assert!(session.current_token().is_none());
        // Idempotent.
        session.logout();
        assert!(session.current_token().is_none());
    }

    #[test]
    fn test_token_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = Session::new(FileTokenStore::at_path(path.clone()));
        session.login("persisted-token");

        let restored = Session::new(FileTokenStore::at_path(path.clone()));
        assert_eq!(restored.current_token().as_deref(), Some("persisted-token"));

        restored.logout();
        let after_logout = Session::new(FileTokenStore::at_path(path));
        assert!(after_logout.current_token().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_logout() {
        let session = Session::new(MemoryTokenStore::default());
        session.login("tok");

        let mut rx = session.subscribe();
        assert_eq!(rx.borrow().as_deref(), Some("tok"));

        session.logout();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
