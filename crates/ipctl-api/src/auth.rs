// Authentication strategies
//
// Session auth posts the profile's username/password to `/login` once and
// relies on the cookie store afterwards. Client-credentials auth exchanges
// the client id/secret at `/oauth/token` and attaches a bearer token to
// every request, refreshing it shortly before it expires.

use std::time::Duration;

use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;
use url::Url;

use crate::error::Error;

pub const LOGIN_PATH: &str = "/login";
pub const TOKEN_PATH: &str = "/oauth/token";

/// Refresh this long before the server-reported expiry.
const EXPIRY_SKEW: Duration = Duration::from_secs(30);

/// Which authentication strategy a client uses.
///
/// Marker enum (no data) -- the credentials live on the [`Profile`](crate::Profile).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Cookie-based session established by `POST /login`.
    Session,
    /// OAuth2 client-credentials bearer token.
    ClientCredentials,
}

/// Body of `POST /login`: `{"user":{"username":…,"password":…}}`.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    user: LoginUser<'a>,
}

#[derive(Serialize)]
struct LoginUser<'a> {
    username: &'a str,
    password: &'a str,
}

impl<'a> LoginRequest<'a> {
    pub(crate) fn new(username: &'a str, password: &'a SecretString) -> Self {
        Self {
            user: LoginUser {
                username,
                password: password.expose_secret(),
            },
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    value: SecretString,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.expires_at
            .is_none_or(|at| Instant::now() + EXPIRY_SKEW < at)
    }
}

/// OAuth2 client-credentials token source.
///
/// Credentials travel in the `Authorization: Basic` header; no scopes are
/// requested. The token is cached until shortly before `expires_in`.
pub struct ClientCredentials {
    token_url: Url,
    client_id: String,
    client_secret: SecretString,
    cached: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl ClientCredentials {
    pub fn new(
        base_url: &Url,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Result<Self, Error> {
        Ok(Self {
            token_url: base_url.join(TOKEN_PATH)?,
            client_id: client_id.into(),
            client_secret,
            cached: Mutex::new(None),
        })
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Return a valid access token, fetching a new one if needed.
    pub async fn access_token(&self, http: &reqwest::Client) -> Result<SecretString, Error> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.fetch(http).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn fetch(&self, http: &reqwest::Client) -> Result<CachedToken, Error> {
        debug!(url = %self.token_url, "requesting client-credentials token");

        let resp = http
            .post(self.token_url.clone())
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .header(ACCEPT, "application/json")
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token request failed (HTTP {status}): {body}"),
            });
        }

        let body = resp.bytes().await?;
        let token: TokenResponse =
            serde_json::from_slice(&body).map_err(|e| Error::deserialization(&e, &body))?;

        debug!(expires_in = ?token.expires_in, "client-credentials token acquired");
        Ok(CachedToken {
            value: SecretString::from(token.access_token),
            expires_at: token
                .expires_in
                .map(|secs| Instant::now() + Duration::from_secs(secs)),
        })
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_body_shape() {
        let password: SecretString = "b".to_string().into();
        let body = serde_json::to_value(LoginRequest::new("a", &password)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"user": {"username": "a", "password": "b"}})
        );
    }

    #[test]
    fn token_url_is_rooted() {
        let base = Url::parse("https://platform:3443/").unwrap();
        let creds = ClientCredentials::new(&base, "id", "s".to_string().into()).unwrap();
        assert_eq!(creds.token_url().as_str(), "https://platform:3443/oauth/token");
    }

    #[test]
    fn token_without_expiry_stays_fresh() {
        let token = CachedToken {
            value: "t".to_string().into(),
            expires_at: None,
        };
        assert!(token.is_fresh());

        let expiring = CachedToken {
            value: "t".to_string().into(),
            expires_at: Some(Instant::now() + Duration::from_secs(5)),
        };
        assert!(!expiring.is_fresh());
    }
}
