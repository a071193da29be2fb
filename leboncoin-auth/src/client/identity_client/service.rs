use async_trait::async_trait;
use leboncoin_api::{ApiError, Client, Login, Register, Session, UserIdentity};

/// Remote identity service.
///
/// Production uses [`leboncoin_api::Client`]; tests substitute a scripted
/// implementation that never touches the network.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn register(&self, request: Register) -> Result<UserIdentity, ApiError>;

    async fn login(&self, request: Login) -> Result<Session, ApiError>;
}

#[async_trait]
impl IdentityService for Client {
    async fn register(&self, request: Register) -> Result<UserIdentity, ApiError> {
        self.send(request).await
    }

    async fn login(&self, request: Login) -> Result<Session, ApiError> {
        self.send(request).await
    }
}
