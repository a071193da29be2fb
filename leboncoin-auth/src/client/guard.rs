use crate::client::AuthState;

pub const HOME_PATH: &str = "/";
pub const SIGN_IN_PATH: &str = "/login";
pub const SIGN_UP_PATH: &str = "/signup";

/// Outcome of a guard check, evaluated before a navigation is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectTo(&'static str),
}

/// Protected views require an authenticated session
pub fn can_enter_protected(state: &AuthState) -> GuardDecision {
    if state.is_authenticated {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectTo(SIGN_IN_PATH)
    }
}

/// Sign-in and sign-up are closed to an authenticated session
pub fn can_enter_guest_only(state: &AuthState) -> GuardDecision {
    if state.is_authenticated {
        GuardDecision::RedirectTo(HOME_PATH)
    } else {
        GuardDecision::Allow
    }
}
