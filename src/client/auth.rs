//! OAuth client-credentials token management
//!
//! [`TokenManager`] owns the cached bearer token. The clock and the exchange
//! transport are injected so the refresh logic can be exercised without a
//! network or real time passing.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Client as HttpClient;
use reqwest::header::AUTHORIZATION;
use tokio::sync::RwLock;

use super::models::{AccessToken, TokenResponse};
use crate::config::Credentials;
use crate::error::{ApiError, ConfigError, Result};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Performs the client-credentials exchange
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(&self, credentials: &Credentials) -> Result<TokenResponse>;
}

/// Build the HTTP Basic `Authorization` value for a client id/secret pair.
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}

/// Exchange over HTTP against `POST {base_url}/oauth/token`
pub struct HttpTokenExchange {
    http: HttpClient,
    base_url: String,
}

impl HttpTokenExchange {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TokenExchange for HttpTokenExchange {
    async fn exchange(&self, credentials: &Credentials) -> Result<TokenResponse> {
        let url = format!("{}/oauth/token", self.base_url);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, basic_auth_header(credentials))
            .json(&serde_json::json!({ "grant_type": "client_credentials" }))
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ApiError::TokenExchange {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        Ok(token)
    }
}

/// Lazily obtains and caches the bearer token.
///
/// The cache lock is released before exchanging, so two concurrent callers
/// with an expired token may both exchange. The last write wins.
pub struct TokenManager {
    credentials: Option<Credentials>,
    exchange: Arc<dyn TokenExchange>,
    clock: Arc<dyn Clock>,
    cached: RwLock<Option<AccessToken>>,
}

impl TokenManager {
    /// Create a token manager using the wall clock
    pub fn new(credentials: Option<Credentials>, exchange: Arc<dyn TokenExchange>) -> Self {
        Self::with_clock(credentials, exchange, Arc::new(SystemClock))
    }

    /// Create a token manager with an explicit clock
    pub fn with_clock(
        credentials: Option<Credentials>,
        exchange: Arc<dyn TokenExchange>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            exchange,
            clock,
            cached: RwLock::new(None),
        }
    }

    /// Return a usable bearer token, exchanging credentials when needed.
    pub async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }

        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ConfigError::MissingCredentials)?;

        debug!("Exchanging client credentials for a new access token");
        let response = self.exchange.exchange(credentials).await?;

        let expires_at = chrono::Duration::try_seconds(response.expires_in)
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                ApiError::InvalidResponse(format!(
                    "Token lifetime out of range: {}",
                    response.expires_in
                ))
            })?;
        let token = AccessToken {
            token: response.access_token,
            expires_at,
        };
        debug!("Access token valid until {}", token.expires_at);

        let value = token.token.clone();
        *self.cached.write().await = Some(token);
        Ok(value)
    }

    /// Cached token if it is still outside the expiry buffer
    async fn cached_token(&self) -> Option<String> {
        let now = self.clock.now();
        let cached = self.cached.read().await;
        cached
            .as_ref()
            .filter(|token| token.is_usable_at(now))
            .map(|token| token.token.clone())
    }
}
