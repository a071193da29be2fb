use crate::client::TokenStore;
use crate::error::AuthError;
use leboncoin_api::UserIdentity;
use tokio::sync::watch;

/// Snapshot of the authentication state.
///
/// `is_authenticated` can be `true` while `current_user` is `None`: a token
/// restored from storage at start-up does not carry the identity with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub current_user: Option<UserIdentity>,
    pub is_authenticated: bool,
}

/// Holds the persisted session token and the observable [`AuthState`].
///
/// Built once per process and shared by reference. Subscribers are notified
/// whenever the snapshot changes.
pub struct SessionStore {
    tokens: TokenStore,
    state: watch::Sender<AuthState>,
}

impl SessionStore {
    /// Open the store and derive the initial state from the persisted token
    pub fn open(tokens: TokenStore) -> Self {
        let stored = match tokens.load_token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read stored token, starting signed out: {}", e);
                None
            }
        };

        let initial = AuthState {
            current_user: None,
            is_authenticated: stored.is_some(),
        };

        if initial.is_authenticated {
            tracing::info!("Restored session from stored token");
        }

        let (state, _) = watch::channel(initial);
        Self { tokens, state }
    }

    pub fn save_token(&self, token: &str) -> Result<(), AuthError> {
        self.tokens.save_token(token)
    }

    pub fn read_token(&self) -> Option<String> {
        self.tokens.load_token().unwrap_or_else(|e| {
            tracing::warn!("Failed to read stored token: {}", e);
            None
        })
    }

    pub fn clear_token(&self) -> Result<(), AuthError> {
        self.tokens.delete_token()
    }

    /// Mark the session authenticated for `user`
    pub fn set_authenticated(&self, user: Option<UserIdentity>) {
        self.state.send_if_modified(|state| {
            let next = AuthState {
                current_user: user,
                is_authenticated: true,
            };
            let changed = *state != next;
            *state = next;
            changed
        });
    }

    pub fn clear_authenticated(&self) {
        self.state.send_if_modified(|state| {
            let changed = *state != AuthState::default();
            *state = AuthState::default();
            changed
        });
    }

    /// Current snapshot
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.state.borrow().current_user.clone()
    }

    /// Receiver notified whenever the state changes
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}
