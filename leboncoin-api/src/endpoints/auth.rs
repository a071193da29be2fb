use super::ApiRequest;
use chrono::NaiveDateTime;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;

// Common

/// Public profile of an account, as served by the identity service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: i64,
    pub email: String,
    pub email_verified: Option<bool>,
    pub created_at: Option<NaiveDateTime>,
}

/// Email and password pair submitted to the service.
///
/// Lives only as long as a single request; the password is kept out of
/// `Debug` output.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl Serialize for Credentials {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Credentials", 2)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.end()
    }
}

// Requests

/// Account creation. Does not open a session on its own.
#[derive(Debug)]
pub struct Register {
    credentials: Credentials,
}

impl Register {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn email(&self) -> &str {
        &self.credentials.email
    }
}

impl ApiRequest for Register {
    type Body = Credentials;
    type Response = UserIdentity;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/register".into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.credentials)
    }
}

#[derive(Debug)]
pub struct Login {
    credentials: Credentials,
}

impl Login {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn email(&self) -> &str {
        &self.credentials.email
    }
}

impl ApiRequest for Login {
    type Body = Credentials;
    type Response = Session;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/login".into()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.credentials)
    }
}

// Responses

/// Bearer token plus the identity it was issued for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserIdentity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credentials_serialize_with_exposed_password() {
        let credentials = Credentials::new("jane@example.com", "hunter22");
        let value = serde_json::to_value(&credentials).unwrap();
        assert_eq!(
            value,
            json!({ "email": "jane@example.com", "password": "hunter22" })
        );
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials::new("jane@example.com", "hunter22");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn requests_expose_submitted_email() {
        let register = Register::new(Credentials::new("jane@example.com", "hunter22"));
        let login = Login::new(Credentials::new("jane@example.com", "hunter22"));

        assert_eq!(register.email(), "jane@example.com");
        assert_eq!(login.email(), "jane@example.com");
        assert_eq!(register.endpoint(), "/auth/register");
        assert_eq!(login.endpoint(), "/auth/login");
    }

    #[test]
    fn user_identity_reads_camel_case_fields() {
        let user: UserIdentity = serde_json::from_value(json!({
            "id": 7,
            "email": "jane@example.com",
            "emailVerified": false,
            "createdAt": "2024-03-01T10:15:30"
        }))
        .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.email_verified, Some(false));
        assert!(user.created_at.is_some());
    }

    #[test]
    fn user_identity_tolerates_missing_optional_fields() {
        let user: UserIdentity =
            serde_json::from_value(json!({ "id": 1, "email": "a@b.fr", "role": "USER" })).unwrap();
        assert_eq!(user.email_verified, None);
        assert_eq!(user.created_at, None);
    }
}
