pub mod google;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub use google::GoogleProvider;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity provider unreachable: {0}")]
    Transport(String),

    #[error("code exchange failed: {0}")]
    Exchange(String),

    #[error("identity provider not configured: {0}")]
    MissingConfig(&'static str),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Transport(err.to_string())
    }
}

/// Authenticated caller resolved from a bearer credential
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

/// Raw user info payload as returned by the provider
#[derive(Debug, Deserialize)]
struct UserInfoPayload {
    #[serde(default)]
    error: Option<Value>,
    id: String,
    email: String,
}

impl AuthUser {
    /// Parse a provider user info body. `None` if it carries an `error` member
    /// or does not have the `{id, email}` string shape.
    pub fn from_user_info(body: &[u8]) -> Option<Self> {
        let payload: UserInfoPayload = serde_json::from_slice(body).ok()?;
        match payload.error {
            Some(Value::Null) | None => Some(Self {
                id: payload.id,
                email: payload.email,
            }),
            Some(_) => None,
        }
    }
}

/// External OAuth identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Consent screen URL carrying `state`
    fn auth_code_url(&self, state: &str) -> String;

    /// Exchange an authorization code for an access token
    async fn exchange_code(&self, code: &str) -> Result<String, AuthError>;

    /// Fetch the raw user info body for an access token
    async fn user_info(&self, token: &str) -> Result<Vec<u8>, AuthError>;
}
