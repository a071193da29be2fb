pub mod auth;

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// A typed call against the identity service.
///
/// Implementors describe where the request goes and what it carries; the
/// [`Client`](crate::Client) takes care of sending it and decoding the reply.
pub trait ApiRequest {
    type Body: Serialize;
    type Response: DeserializeOwned;

    const METHOD: Method = Method::GET;

    /// Path relative to the service base URL, starting with `/`
    fn endpoint(&self) -> Cow<'_, str>;

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}
