use async_trait::async_trait;
use leboncoin_api::{ApiError, Login, Register, Session, StatusCode, UserIdentity};
use leboncoin_auth::{
    AuthState, IdentityClient, IdentityService, Router, SessionStore, TokenStore,
};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::app::routes;
use crate::forms::{SignInForm, SignUpForm, SubmitOutcome};

/// Identity service replaying scripted replies (no network)
///
/// Replies are consumed in order. A call with nothing scripted panics so a
/// test notices an unexpected remote call.
#[derive(Default)]
pub struct MockIdentityService {
    register_replies: Mutex<VecDeque<Result<UserIdentity, ApiError>>>,
    login_replies: Mutex<VecDeque<Result<Session, ApiError>>>,
    register_calls: AtomicUsize,
    login_calls: AtomicUsize,
}

impl MockIdentityService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_register(self, reply: Result<UserIdentity, ApiError>) -> Self {
        self.register_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_login(self, reply: Result<Session, ApiError>) -> Self {
        self.login_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    /// Total number of remote calls made
    pub fn calls(&self) -> usize {
        self.register_calls() + self.login_calls()
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn register(&self, _request: Register) -> Result<UserIdentity, ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.register_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("MockIdentityService: no scripted register reply"))
    }

    async fn login(&self, _request: Login) -> Result<Session, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("MockIdentityService: no scripted login reply"))
    }
}

/// Error reply carrying `status`
pub fn status_error(status: u16) -> ApiError {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    ApiError::Status(status, None)
}

/// Identity returned by the mock service
pub fn test_user(email: &str) -> UserIdentity {
    UserIdentity {
        id: 1,
        email: email.to_string(),
        email_verified: Some(false),
        created_at: None,
    }
}

pub fn test_session(email: &str, token: &str) -> Session {
    Session {
        token: token.to_string(),
        user: test_user(email),
    }
}

/// Application wiring over a throwaway token store
pub struct TestApp<S: IdentityService = MockIdentityService> {
    _dir: TempDir,
    store_path: PathBuf,
    client: IdentityClient<S>,
    pub sign_in: SignInForm,
    pub sign_up: SignUpForm,
}

impl<S: IdentityService> TestApp<S> {
    pub fn new(service: S) -> Self {
        Self::build(service, None)
    }

    /// Start as if a previous run had left `token` in storage
    pub fn with_stored_token(service: S, token: &str) -> Self {
        Self::build(service, Some(token))
    }

    fn build(service: S, token: Option<&str>) -> Self {
        let dir = TempDir::new().unwrap();
        let store_path = dir.path().join("auth.json");

        let tokens = TokenStore::at(&store_path).unwrap();
        if let Some(token) = token {
            tokens.save_token(token).unwrap();
        }

        let session = Arc::new(SessionStore::open(tokens));
        let router = Arc::new(Router::new(session.clone(), routes()));

        Self {
            _dir: dir,
            store_path,
            client: IdentityClient::new(service, session, router),
            sign_in: SignInForm::new(),
            sign_up: SignUpForm::new(),
        }
    }

    pub fn client(&self) -> &IdentityClient<S> {
        &self.client
    }

    pub fn service(&self) -> &S {
        self.client.service()
    }

    pub fn auth_state(&self) -> AuthState {
        self.client.session().state()
    }

    pub fn route(&self) -> String {
        self.client.router().current()
    }

    pub fn navigate(&self, path: &str) -> String {
        self.client.router().navigate(path)
    }

    /// Token as read back by a brand new store over the same file
    pub fn stored_token(&self) -> Option<String> {
        TokenStore::at(&self.store_path)
            .and_then(|store| store.load_token())
            .unwrap()
    }

    pub async fn submit_sign_in(&mut self) -> SubmitOutcome {
        self.sign_in.submit(&self.client).await
    }

    pub async fn submit_sign_up(&mut self) -> SubmitOutcome {
        self.sign_up.submit(&self.client).await
    }

    pub fn logout(&self) {
        self.client.logout();
    }
}
