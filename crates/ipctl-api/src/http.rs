// Authenticated HTTP transport
//
// `HttpClient` performs one exchange per `send()`: it builds the absolute
// URL from the profile, attaches JSON headers, authenticates (session
// login on first use, or an OAuth2 bearer token on every request), and
// races the exchange against the cancellation token. Status codes are not
// interpreted here; see `ApiClient::execute` for the status contract.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use crate::auth::{ClientCredentials, LOGIN_PATH, LoginRequest};
use crate::cookies::CookieStore;
use crate::error::Error;
use crate::profile::Profile;
use crate::request::{Method, Request, Response};
use crate::transport::TransportConfig;

const JSON: &str = "application/json";

/// Raw transport bound to one platform profile.
///
/// Safe to share between tasks: the cookie store is lock-protected, the
/// session flag is atomic, and the first login is serialized so only one
/// `POST /login` is ever issued per client.
pub struct HttpClient {
    profile: Profile,
    http: reqwest::Client,
    base_url: Url,
    cookies: Arc<CookieStore>,
    cancel: CancellationToken,
    authenticated: AtomicBool,
    login_lock: Mutex<()>,
    oauth: Option<ClientCredentials>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.is_authenticated())
            .field("oauth", &self.oauth.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Build a client for `profile` with its own cancellation token.
    pub fn new(profile: Profile) -> Result<Self, Error> {
        Self::with_cancellation(profile, CancellationToken::new())
    }

    /// Build a client that aborts in-flight and future sends once `cancel` fires.
    pub fn with_cancellation(profile: Profile, cancel: CancellationToken) -> Result<Self, Error> {
        let base_url = profile.base_url()?;
        let transport = TransportConfig::from_profile(&profile);
        let http = transport.build_client()?;

        let oauth = match (&profile.client_id, &profile.client_secret) {
            (Some(id), Some(secret)) if profile.has_client_credentials() => Some(
                ClientCredentials::new(&base_url, id.clone(), secret.clone())?,
            ),
            _ => None,
        };

        debug!(
            base_url = %base_url,
            strategy = ?profile.auth_strategy(),
            "http client ready"
        );

        Ok(Self {
            profile,
            http,
            base_url,
            cookies: transport.cookie_store,
            cancel,
            authenticated: AtomicBool::new(false),
            login_lock: Mutex::new(()),
            oauth,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cookies(&self) -> &CookieStore {
        &self.cookies
    }

    /// `true` once a basic-auth login has succeeded. Never set under OAuth2.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Acquire)
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Cancel the in-flight send (if any) and every send after it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Execute one exchange. Any status code is a successful send.
    pub async fn send(&self, method: Method, request: &Request) -> Result<Response, Error> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        request.validate()?;
        self.ensure_authenticated().await?;
        self.dispatch(method, request).await
    }

    // ── Authentication ───────────────────────────────────────────────

    async fn ensure_authenticated(&self) -> Result<(), Error> {
        if self.oauth.is_some() || self.is_authenticated() {
            return Ok(());
        }

        let _guard = self.login_lock.lock().await;
        if self.is_authenticated() {
            return Ok(());
        }
        self.login().await?;
        self.authenticated.store(true, Ordering::Release);
        Ok(())
    }

    async fn login(&self) -> Result<(), Error> {
        let username = self.profile.username.as_deref().unwrap_or_default();
        let empty = SecretString::from(String::new());
        let password = self.profile.password.as_ref().unwrap_or(&empty);

        debug!(username, "logging in");
        let request = Request::new(LOGIN_PATH)
            .json(&LoginRequest::new(username, password))?
            .no_log();

        let response = self
            .dispatch(Method::Post, &request)
            .await
            .map_err(|e| match e {
                Error::Cancelled | Error::Timeout { .. } | Error::Authentication { .. } => e,
                other => Error::Authentication {
                    message: format!("unable to reach {}: {other}", self.base_url),
                },
            })?;

        if response.status_code != 200 {
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {}): {}", response.status, response.text()),
            });
        }

        debug!("session established");
        Ok(())
    }

    // ── Exchange ─────────────────────────────────────────────────────

    fn url_for(&self, request: &Request) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&request.path);
        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.params);
        }
        url
    }

    async fn dispatch(&self, method: Method, request: &Request) -> Result<Response, Error> {
        let url = self.url_for(request);
        let body = request.body_bytes()?;

        info!(path = %request.path, %method, url = %url, "request");
        if !request.no_log && request.path != LOGIN_PATH && !body.is_empty() {
            debug!(body = %String::from_utf8_lossy(&body), "request body");
        }

        let exchange = self.exchange(method, url, request, body);
        let response = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return Err(Error::Cancelled),
            result = exchange => result.map_err(|e| self.classify(e))?,
        };

        info!(path = %request.path, %method, status = %response.status, "response");
        Ok(response)
    }

    async fn exchange(
        &self,
        method: Method,
        url: Url,
        request: &Request,
        body: Bytes,
    ) -> Result<Response, Error> {
        let mut builder = self
            .http
            .request(method.to_reqwest(), url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .header(CONTENT_LENGTH, body.len());

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        if let Some(oauth) = &self.oauth {
            let token = oauth.access_token(&self.http).await?;
            builder = builder.bearer_auth(token.expose_secret());
        }

        let resp = builder.body(body).send().await?;
        let status = resp.status();
        let url = resp.url().clone();
        let headers = first_values(resp.headers());
        let body = resp.bytes().await?;

        Ok(Response {
            method,
            url,
            status: format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or(""))
                .trim_end()
                .to_owned(),
            status_code: status.as_u16(),
            headers,
            body,
        })
    }

    fn classify(&self, err: Error) -> Error {
        match err {
            Error::Transport(e) if e.is_timeout() => Error::Timeout {
                timeout_secs: self.profile.timeout,
            },
            other => other,
        }
    }
}

/// First value of every header, keyed by lowercase name.
fn first_values(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .keys()
        .filter_map(|name| {
            let value = headers.get(name)?.to_str().ok()?;
            Some((name.as_str().to_owned(), value.to_owned()))
        })
        .collect()
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_path_and_ordered_query() {
        let client = HttpClient::new(Profile::new("svc").with_port(8080)).unwrap();
        let request = Request::new("/automation-studio/workflows")
            .param("equals[name]", "a b")
            .param("limit", "100");
        assert_eq!(
            client.url_for(&request).as_str(),
            "http://svc:8080/automation-studio/workflows?equals%5Bname%5D=a+b&limit=100"
        );
    }

    #[test]
    fn oauth_selected_when_credentials_present() {
        let profile = Profile::new("svc")
            .with_client_credentials("cid", "secret".to_string().into());
        let client = HttpClient::new(profile).unwrap();
        assert!(client.oauth.is_some());
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn cancelled_client_refuses_to_send() {
        let client = HttpClient::new(Profile::new("127.0.0.1").with_port(9)).unwrap();
        client.cancel();
        let err = client
            .send(Method::Get, &Request::new("/whoami"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test]
    async fn relative_path_fails_before_login() {
        let client = HttpClient::new(Profile::new("127.0.0.1").with_port(9)).unwrap();
        let err = client
            .send(Method::Get, &Request::new("whoami"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }
}
