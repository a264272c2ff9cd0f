use chrono::Utc;
use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;

use crate::{
    config,
    error::MosaicError,
    info,
    types::{Token, TokenResponse},
    utils,
};

/// Seconds before the real expiry at which a token is considered stale.
const EXPIRY_BUFFER_SECS: u64 = 240;

/// Credentials plus the bearer token obtained with them.
///
/// A session lives for one mosaic run and is handed by reference to the
/// catalog client. The token is requested on first use and requested again
/// once it is about to expire.
pub struct Session {
    client_id: String,
    client_secret: String,
    token_url: String,
    http: Client,
    token: Mutex<Option<Token>>,
}

impl Session {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: config::spotify_apitoken_url(),
            http: Client::new(),
            token: Mutex::new(None),
        }
    }

    /// Builds a session from `SPOTIFY_API_AUTH_CLIENT_ID` / `SPOTIFY_API_AUTH_CLIENT_SECRET`.
    pub fn from_config() -> Result<Self, MosaicError> {
        Ok(Self::new(
            config::spotify_client_id()?,
            config::spotify_client_secret()?,
        ))
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Returns the `Authorization` header value, requesting a token if needed.
    pub async fn authorization(&self) -> Result<String, MosaicError> {
        let mut lock = self.token.lock().await;
        if let Some(token) = lock.as_ref() {
            if !is_expired(token) {
                return Ok(token.authorization());
            }
            info!("Access token expired, requesting a new one.");
        }

        let token = self.request_token().await?;
        let header = token.authorization();
        *lock = Some(token);
        Ok(header)
    }

    async fn request_token(&self) -> Result<Token, MosaicError> {
        info!("Requesting access token.");
        let response = self
            .http
            .post(&self.token_url)
            .header(
                "Authorization",
                utils::basic_auth_header(&self.client_id, &self.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| MosaicError::AuthFailure(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(MosaicError::AuthFailure(
                    "wrong Spotify client ID or secret".to_string(),
                ));
            }
            status => {
                return Err(MosaicError::AuthFailure(format!(
                    "token endpoint answered {status}"
                )));
            }
        }

        let json = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| MosaicError::AuthFailure(e.to_string()))?;

        info!("Authorization complete.");
        Ok(Token {
            access_token: json.access_token,
            token_type: json.token_type,
            expires_in: json.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}

fn is_expired(token: &Token) -> bool {
    let now = Utc::now().timestamp() as u64;
    now + EXPIRY_BUFFER_SECS >= token.obtained_at + token.expires_in
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(obtained_at: u64, expires_in: u64) -> Token {
        Token {
            access_token: "abc".to_string(),
            token_type: "Bearer".to_string(),
            expires_in,
            obtained_at,
        }
    }

    #[test]
    fn fresh_token_is_not_expired() {
        let now = Utc::now().timestamp() as u64;
        assert!(!is_expired(&token(now, 3600)));
    }

    #[test]
    fn token_inside_buffer_is_expired() {
        let now = Utc::now().timestamp() as u64;
        assert!(is_expired(&token(now - 3500, 3600)));
        assert!(is_expired(&token(0, 3600)));
    }

    #[test]
    fn authorization_header_uses_token_type() {
        assert_eq!(token(0, 0).authorization(), "Bearer abc");
    }
}
