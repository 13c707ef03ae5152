// Connection target for one platform instance.
//
// Mirrors the keys of a profile file section. The CLI builds one of these
// per invocation; everything the transport needs (URL, TLS policy,
// credentials, timeout) is derived from it.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::auth::AuthStrategy;
use crate::error::Error;

/// Connection target: host, TLS policy, credentials, and timeout.
#[derive(Debug, Clone)]
pub struct Profile {
    pub host: String,
    /// `0` means "derive from scheme".
    pub port: u16,
    pub use_tls: bool,
    /// Ignored unless `use_tls` is set.
    pub verify: bool,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub client_id: Option<String>,
    pub client_secret: Option<SecretString>,
    /// Seconds; `0` is unbounded.
    pub timeout: u64,
}

impl Profile {
    /// A plain-HTTP profile with certificate verification on and no credentials.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 0,
            use_tls: false,
            verify: true,
            username: None,
            password: None,
            client_id: None,
            client_secret: None,
            timeout: 0,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_tls(mut self, use_tls: bool, verify: bool) -> Self {
        self.use_tls = use_tls;
        self.verify = verify;
        self
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: SecretString) -> Self {
        self.username = Some(username.into());
        self.password = Some(password);
        self
    }

    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret);
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_tls { "https" } else { "http" }
    }

    /// `host`, or `host:port` when an explicit port is configured.
    pub fn authority(&self) -> String {
        if self.port == 0 {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// `{scheme}://{authority}/`
    pub fn base_url(&self) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}://{}", self.scheme(), self.authority()))?)
    }

    /// Both client id and secret are present and non-empty.
    pub fn has_client_credentials(&self) -> bool {
        self.client_id.as_deref().is_some_and(|id| !id.is_empty()) && self.client_secret.is_some()
    }

    /// OAuth2 wins when both credential pairs are configured.
    pub fn auth_strategy(&self) -> AuthStrategy {
        if self.has_client_credentials() {
            AuthStrategy::ClientCredentials
        } else {
            AuthStrategy::Session
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_port_with_tls_omits_port() {
        let profile = Profile::new("platform.example.com").with_tls(true, true);
        assert_eq!(profile.authority(), "platform.example.com");
        assert_eq!(
            profile.base_url().unwrap().as_str(),
            "https://platform.example.com/"
        );
    }

    #[test]
    fn explicit_port_is_kept() {
        let profile = Profile::new("localhost").with_port(3000);
        assert_eq!(profile.base_url().unwrap().as_str(), "http://localhost:3000/");
    }

    #[test]
    fn client_credentials_preferred_over_basic() {
        let profile = Profile::new("h")
            .with_basic_auth("admin", "pw".to_string().into())
            .with_client_credentials("cid", "secret".to_string().into());
        assert_eq!(profile.auth_strategy(), AuthStrategy::ClientCredentials);
    }

    #[test]
    fn zero_timeout_is_unbounded() {
        assert!(Profile::new("h").request_timeout().is_none());
        assert_eq!(
            Profile::new("h").with_timeout(5).request_timeout(),
            Some(Duration::from_secs(5))
        );
    }
}
