use crate::client::guard::{self, GuardDecision, HOME_PATH, SIGN_IN_PATH, SIGN_UP_PATH};
use crate::client::SessionStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;

const MAX_REDIRECTS: usize = 4;

/// Which guard a route sits behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    GuestOnly,
}

/// Paths and the access rule for each. Unlisted paths are public.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, Access>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    pub fn route(mut self, path: impl Into<String>, access: Access) -> Self {
        self.routes.insert(path.into(), access);
        self
    }

    pub fn protect(self, path: impl Into<String>) -> Self {
        self.route(path, Access::Protected)
    }

    pub fn access(&self, path: &str) -> Access {
        self.routes.get(path).copied().unwrap_or(Access::Public)
    }
}

impl Default for RouteTable {
    /// Home is public, sign-in and sign-up are guest-only
    fn default() -> Self {
        Self::new()
            .route(HOME_PATH, Access::Public)
            .route(SIGN_IN_PATH, Access::GuestOnly)
            .route(SIGN_UP_PATH, Access::GuestOnly)
    }
}

/// Navigation layer: checks guards against the live session before
/// committing a transition, and publishes the current path.
pub struct Router {
    session: Arc<SessionStore>,
    routes: RouteTable,
    current: watch::Sender<String>,
}

impl Router {
    pub fn new(session: Arc<SessionStore>, routes: RouteTable) -> Self {
        let (current, _) = watch::channel(HOME_PATH.to_string());
        Self {
            session,
            routes,
            current,
        }
    }

    /// Decide whether `path` may be entered right now
    pub fn check(&self, path: &str) -> GuardDecision {
        let state = self.session.state();
        match self.routes.access(path) {
            Access::Public => GuardDecision::Allow,
            Access::Protected => guard::can_enter_protected(&state),
            Access::GuestOnly => guard::can_enter_guest_only(&state),
        }
    }

    /// Navigate to `path`, following guard redirects.
    /// Returns the path that was actually committed.
    pub fn navigate(&self, path: &str) -> String {
        let mut target = path.to_string();

        for _ in 0..=MAX_REDIRECTS {
            match self.check(&target) {
                GuardDecision::Allow => {
                    tracing::debug!("Navigating to {}", target);
                    self.current.send_replace(target.clone());
                    return target;
                }
                GuardDecision::RedirectTo(next) => {
                    tracing::debug!("Guard redirected {} to {}", target, next);
                    target = next.to_string();
                }
            }
        }

        let current = self.current();
        tracing::warn!(
            "Too many redirects navigating to {}, staying on {}",
            path,
            current
        );
        current
    }

    pub fn current(&self) -> String {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::TokenStore;
    use tempfile::TempDir;

    fn router(dir: &TempDir, routes: RouteTable) -> (Arc<SessionStore>, Router) {
        let store = TokenStore::at(dir.path().join("auth.json")).unwrap();
        let session = Arc::new(SessionStore::open(store));
        let router = Router::new(session.clone(), routes);
        (session, router)
    }

    #[test]
    fn test_starts_at_home() {
        let dir = TempDir::new().unwrap();
        let (_session, router) = router(&dir, RouteTable::default());
        assert_eq!(router.current(), HOME_PATH);
    }

    #[test]
    fn test_protected_route_sends_guest_to_sign_in() {
        let dir = TempDir::new().unwrap();
        let (_session, router) = router(&dir, RouteTable::default().protect("/ads/new"));

        assert_eq!(router.navigate("/ads/new"), SIGN_IN_PATH);
        assert_eq!(router.current(), SIGN_IN_PATH);
    }

    #[test]
    fn test_signed_in_user_cannot_reach_sign_up() {
        let dir = TempDir::new().unwrap();
        let (session, router) = router(&dir, RouteTable::default());
        session.set_authenticated(None);

        assert_eq!(router.navigate(SIGN_UP_PATH), HOME_PATH);
    }

    #[test]
    fn test_decision_follows_live_state() {
        let dir = TempDir::new().unwrap();
        let (session, router) = router(&dir, RouteTable::default().protect("/account"));

        assert_eq!(
            router.check("/account"),
            GuardDecision::RedirectTo(SIGN_IN_PATH)
        );
        session.set_authenticated(None);
        assert_eq!(router.check("/account"), GuardDecision::Allow);
        session.clear_authenticated();
        assert_eq!(
            router.check("/account"),
            GuardDecision::RedirectTo(SIGN_IN_PATH)
        );
    }

    #[test]
    fn test_unknown_paths_are_public() {
        let dir = TempDir::new().unwrap();
        let (_session, router) = router(&dir, RouteTable::default());
        assert_eq!(router.navigate("/ads/17"), "/ads/17");
    }

    #[test]
    fn test_subscribers_see_route_changes() {
        let dir = TempDir::new().unwrap();
        let (_session, router) = router(&dir, RouteTable::default().protect("/account"));
        let mut rx = router.subscribe();
        assert!(!rx.has_changed().unwrap());

        router.navigate("/account");

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SIGN_IN_PATH);
    }

    #[test]
    fn test_redirect_loop_keeps_current_route() {
        let dir = TempDir::new().unwrap();
        // Sign-in itself protected: a guest keeps bouncing back to it
        let routes = RouteTable::default()
            .route(SIGN_IN_PATH, Access::Protected)
            .protect("/account");
        let (_session, router) = router(&dir, routes);

        assert_eq!(router.navigate("/account"), HOME_PATH);
        assert_eq!(router.current(), HOME_PATH);
    }
}
