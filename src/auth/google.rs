use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{AuthError, IdentityProvider};
use crate::config::OAuthConfig;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google OAuth2 identity provider
pub struct GoogleProvider {
    config: OAuthConfig,
    http: Client,
}

impl GoogleProvider {
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn auth_code_url(&self, state: &str) -> String {
        let mut url = match Url::parse(&self.config.auth_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Invalid OAuth auth_url '{}': {}", self.config.auth_url, e);
                return self.config.auth_url.clone();
            }
        };

        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("state", state);

        url.into()
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        if self.config.client_id.is_empty() {
            return Err(AuthError::MissingConfig("CLIENT_ID"));
        }
        if self.config.client_secret.is_empty() {
            return Err(AuthError::MissingConfig("CLIENT_SECRET"));
        }

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Exchange(format!("token endpoint returned {}", response.status())));
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        Ok(token.access_token)
    }

    async fn user_info(&self, token: &str) -> Result<Vec<u8>, AuthError> {
        // Error statuses still carry a JSON body with an `error` member
        let body = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(token)
            .send()
            .await?
            .bytes()
            .await?;

        Ok(body.to_vec())
    }
}
