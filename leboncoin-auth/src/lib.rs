// Client-side session layer for the leboncoin identity service
mod client;
mod error;

pub use client::{
    can_enter_guest_only, can_enter_protected, connect, Access, AuthState, GuardDecision,
    IdentityClient, IdentityService, RouteTable, Router, SessionStore, Settings, TokenStore,
    HOME_PATH, SIGN_IN_PATH, SIGN_UP_PATH,
};
pub use error::AuthError;
