mod service;

use crate::client::guard::SIGN_IN_PATH;
use crate::client::{Router, SessionStore};
use crate::error::AuthError;
use leboncoin_api::{Client, Login, Register, Session, UserIdentity};
pub use service::IdentityService;
use std::sync::Arc;

/// Sends credential submissions to the identity service and folds the
/// results into the [`SessionStore`].
///
/// Remote failures are handed back untouched; interpreting them is the
/// caller's business.
pub struct IdentityClient<S: IdentityService = Client> {
    service: S,
    session: Arc<SessionStore>,
    router: Arc<Router>,
}

impl<S: IdentityService> IdentityClient<S> {
    pub fn new(service: S, session: Arc<SessionStore>, router: Arc<Router>) -> Self {
        Self {
            service,
            session,
            router,
        }
    }

    /// Create an account. The session is left as it was.
    pub async fn register(&self, request: Register) -> Result<UserIdentity, AuthError> {
        tracing::debug!(email = request.email(), "Registering account");
        let user = self.service.register(request).await?;
        tracing::info!(user_id = user.id, "User registered successfully");
        Ok(user)
    }

    /// Authenticate, persist the token and publish the new identity
    pub async fn login(&self, request: Login) -> Result<Session, AuthError> {
        tracing::debug!(email = request.email(), "Logging in");
        let session = self.service.login(request).await?;

        self.session.save_token(&session.token)?;
        self.session.set_authenticated(Some(session.user.clone()));

        tracing::info!(user_id = session.user.id, "User logged in successfully");
        Ok(session)
    }

    /// Drop the session and go back to sign-in. Never fails: a token that
    /// cannot be removed from storage is logged and the in-memory state is
    /// cleared regardless.
    pub fn logout(&self) {
        if let Err(e) = self.session.clear_token() {
            tracing::warn!("Failed to remove stored token: {}", e);
        }
        self.session.clear_authenticated();
        self.router.navigate(SIGN_IN_PATH);

        tracing::info!("User logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn get_token(&self) -> Option<String> {
        self.session.read_token()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }
}
