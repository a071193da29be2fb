pub mod endpoints;
mod error;
pub mod repositories;

pub use crate::endpoints::ApiRequest;
pub use crate::endpoints::auth::{Credentials, Login, Register, Session, UserIdentity};
pub use crate::error::{ApiError, ErrorBody, FailureKind};
pub use reqwest::StatusCode;
use repositories::*;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the identity service rooted at `base_url`
#[derive(Debug, Clone)]
pub struct Client {
    http_client: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Internal)?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        let url = format!("{}{}", self.base_url, request.endpoint());

        let mut builder = self.http_client.request(R::METHOD, &url);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(ApiError::from_transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .ok()
                .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok());
            return Err(ApiError::Status(status, body));
        }

        resp.json::<R::Response>().await.map_err(ApiError::Decode)
    }
}

pub struct Request;

impl Request {
    pub fn new() -> Self {
        Self {}
    }

    pub fn auth() -> AuthRepository {
        AuthRepository::new()
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
