use tokio::sync::watch;

use cinelog_core::Session;

/// Outcome of a guard check for a protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLanding,
}

/// Gates protected views on session presence.
///
/// `decide` is a pure function of the current token. `changes` exposes
/// the session watch channel so a shell can redirect the moment a
/// logout (explicit or 401-triggered) lands, keeping navigation inside
/// the application instead of a hard redirect.
pub struct RouteGuard {
    session: Session,
}

impl RouteGuard {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn decide(&self) -> RouteDecision {
        if self.session.is_authenticated() {
            RouteDecision::Allow
        } else {
            RouteDecision::RedirectToLanding
        }
    }

    pub fn changes(&self) -> watch::Receiver<Option<String>> {
        self.session.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinelog_api::backend::BackendClient;
    use cinelog_core::models::ItemFilter;
    use cinelog_core::session::MemoryTokenStore;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_guard_follows_session_presence() {
        let session = Session::new(MemoryTokenStore::default());
        let guard = RouteGuard::new(session.clone());
        assert_eq!(guard.decide(), RouteDecision::RedirectToLanding);

        session.login("tok");
        assert_eq!(guard.decide(), RouteDecision::Allow);

        session.logout();
        assert_eq!(guard.decide(), RouteDecision::RedirectToLanding);
    }

    #[tokio::test]
    async fn test_401_flips_guard_and_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movies"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let session = Session::new(MemoryTokenStore::default());
        session.login("stale");

        let guard = RouteGuard::new(session.clone());
        let mut changes = guard.changes();
        assert_eq!(guard.decide(), RouteDecision::Allow);

        let client = BackendClient::new(server.uri(), session);
        let _ = client.list_items(&ItemFilter::default()).await;

        changes.changed().await.unwrap();
        assert!(changes.borrow().is_none());
        assert_eq!(guard.decide(), RouteDecision::RedirectToLanding);
    }
}
