mod config;
mod guard;
mod identity_client;
mod router;
mod session;
mod token_storage;

pub use config::Settings;
pub use guard::{
    can_enter_guest_only, can_enter_protected, GuardDecision, HOME_PATH, SIGN_IN_PATH,
    SIGN_UP_PATH,
};
pub use identity_client::{IdentityClient, IdentityService};
pub use router::{Access, RouteTable, Router};
pub use session::{AuthState, SessionStore};
pub use token_storage::TokenStore;

use crate::error::AuthError;
use leboncoin_api::Client;
use std::sync::Arc;

/// Build the session stack for `settings`: token storage, session state,
/// router and the HTTP-backed identity client
pub fn connect(settings: &Settings, routes: RouteTable) -> Result<IdentityClient, AuthError> {
    settings.validate().map_err(|e| {
        tracing::error!("Configuration validation failed: {}", e);
        AuthError::Configuration(e)
    })?;

    let token_store = match &settings.token_path {
        Some(path) => TokenStore::at(path)?,
        None => TokenStore::new()?,
    };
    tracing::debug!("Using token store at {}", token_store.path().display());

    let session = Arc::new(SessionStore::open(token_store));
    let router = Arc::new(Router::new(session.clone(), routes));
    let api_client = Client::new(settings.api_url.clone())?;

    Ok(IdentityClient::new(api_client, session, router))
}
