//! OAuth token models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of the client-credentials exchange (`POST /oauth/token`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token
    pub access_token: String,

    /// Lifetime in seconds
    pub expires_in: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Cached bearer token with absolute expiry
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The bearer token string
    pub token: String,

    /// Token expiration time
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Safety margin before expiry during which a token is no longer used
    pub const EXPIRY_BUFFER_SECS: i64 = 60;

    /// Whether the token may still be used at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .checked_sub_signed(chrono::Duration::seconds(Self::EXPIRY_BUFFER_SECS))
            .is_some_and(|edge| now < edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_usable_window() {
        let now = Utc::now();
        let token = AccessToken {
            token: "t".to_string(),
            expires_at: now + chrono::Duration::seconds(3600),
        };

        assert!(token.is_usable_at(now));
        assert!(token.is_usable_at(now + chrono::Duration::seconds(3539)));
        // Inside the 60 second buffer
        assert!(!token.is_usable_at(now + chrono::Duration::seconds(3540)));
        assert!(!token.is_usable_at(now + chrono::Duration::seconds(3600)));
    }

    #[test]
    fn test_token_response_parses() {
        let json = r#"{"access_token": "abc", "expires_in": 3600, "token_type": "bearer"}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "abc");
        assert_eq!(response.expires_in, 3600);
    }
}
