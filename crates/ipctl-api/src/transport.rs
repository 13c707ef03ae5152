// Transport configuration for building the reqwest::Client.
//
// TLS policy, timeout, and the shared cookie store all come from the
// connection profile; this module keeps the builder logic in one place.

use std::sync::Arc;
use std::time::Duration;

use crate::cookies::CookieStore;
use crate::profile::Profile;

const USER_AGENT: &str = concat!("ipctl/", env!("CARGO_PKG_VERSION"));

/// TLS verification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Accept any certificate (dev/test platforms with self-signed certs).
    DangerAcceptInvalid,
}

/// Everything needed to build the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// `None` leaves the exchange unbounded.
    pub timeout: Option<Duration>,
    pub cookie_store: Arc<CookieStore>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: None,
            cookie_store: Arc::new(CookieStore::new()),
        }
    }
}

impl TransportConfig {
    /// Derive TLS mode and timeout from a profile, with a fresh cookie store.
    pub fn from_profile(profile: &Profile) -> Self {
        let tls = if profile.use_tls && !profile.verify {
            TlsMode::DangerAcceptInvalid
        } else {
            TlsMode::System
        };
        Self {
            tls,
            timeout: profile.request_timeout(),
            cookie_store: Arc::new(CookieStore::new()),
        }
    }

    /// Build a `reqwest::Client` from this config.
    ///
    /// The timeout, when set, bounds connect + TLS + send + full body read.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(Arc::clone(&self.cookie_store));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if self.tls == TlsMode::DangerAcceptInvalid {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_off_only_matters_with_tls() {
        let plain = Profile::new("h").with_tls(false, false);
        assert_eq!(TransportConfig::from_profile(&plain).tls, TlsMode::System);

        let insecure = Profile::new("h").with_tls(true, false);
        assert_eq!(
            TransportConfig::from_profile(&insecure).tls,
            TlsMode::DangerAcceptInvalid
        );
    }

    #[test]
    fn timeout_follows_profile() {
        let config = TransportConfig::from_profile(&Profile::new("h").with_timeout(3));
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
        assert!(TransportConfig::from_profile(&Profile::new("h")).timeout.is_none());
    }
}
