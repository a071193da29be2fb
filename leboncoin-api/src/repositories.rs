use crate::endpoints::auth::{Credentials, Login, Register};

pub struct AuthRepository;

impl AuthRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn register(&self, email: impl Into<String>, password: impl Into<String>) -> Register {
        Register::new(Credentials::new(email, password))
    }

    pub fn login(&self, email: impl Into<String>, password: impl Into<String>) -> Login {
        Login::new(Credentials::new(email, password))
    }
}

impl Default for AuthRepository {
    fn default() -> Self {
        Self::new()
    }
}
