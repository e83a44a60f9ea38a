use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub oauth: OAuthConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub ensure_schema: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Opaque state value handed to the provider's consent screen
    pub auth_code_state: String,
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// `APP_ENV` picks the profile defaults, then individual variables override them.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let config = Self::for_environment(environment).with_env_overrides();

        if config.database.url.is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        Ok(config)
    }

    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("POSTBOARD_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("POSTBOARD_BIND_HOST") {
            self.server.bind_host = v;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_ENSURE_SCHEMA") {
            self.database.ensure_schema = v.parse().unwrap_or(self.database.ensure_schema);
        }

        // OAuth overrides
        if let Ok(v) = env::var("CLIENT_ID") {
            self.oauth.client_id = v;
        }
        if let Ok(v) = env::var("CLIENT_SECRET") {
            self.oauth.client_secret = v;
        }
        if let Ok(v) = env::var("AUTH_CODE_URL") {
            self.oauth.auth_code_state = v;
        }
        if let Ok(v) = env::var("OAUTH_REDIRECT_URL") {
            self.oauth.redirect_url = v;
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                bind_host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connection_timeout: 30,
                ensure_schema: true,
            },
            oauth: OAuthConfig::google("http://localhost:8080/auth/google/callback"),
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                bind_host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout: 10,
                ensure_schema: true,
            },
            oauth: OAuthConfig::google("https://staging.example.com/auth/google/callback"),
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                bind_host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connection_timeout: 5,
                ensure_schema: false,
            },
            oauth: OAuthConfig::google("https://app.example.com/auth/google/callback"),
            security: SecurityConfig {
                enable_cors: false,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

impl OAuthConfig {
    fn google(redirect_url: &str) -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            auth_code_state: "state".to_string(),
            redirect_url: redirect_url.to_string(),
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_url: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
            scopes: vec!["https://www.googleapis.com/auth/userinfo.email".to_string()],
        }
    }
}
