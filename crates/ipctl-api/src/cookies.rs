// Host-scoped cookie store
//
// Plugged into `reqwest` as its cookie provider. Each write replaces the
// full set of cookies for a host; reads return everything last written.
// There is no path, domain, or expiry matching -- the platform only ever
// hands out a session cookie.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use reqwest::header::HeaderValue;
use tracing::trace;
use url::Url;

/// A single `name=value` cookie pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse the leading `name=value` pair of a `Set-Cookie` header.
    /// Attributes (`Path`, `HttpOnly`, ...) are dropped.
    pub fn parse(set_cookie: &str) -> Option<Self> {
        let pair = set_cookie.split(';').next()?.trim();
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, value.trim()))
    }
}

/// Cookie store keyed by `host:port`.
///
/// Readers share the lock; a writer excludes everyone.
#[derive(Debug, Default)]
pub struct CookieStore {
    entries: RwLock<HashMap<String, Vec<Cookie>>>,
}

impl CookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every cookie held for `host`.
    pub fn set(&self, host: &str, cookies: Vec<Cookie>) {
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(host.to_owned(), cookies);
    }

    /// All cookies last set for `host`, or empty.
    pub fn get(&self, host: &str) -> Vec<Cookie> {
        let guard = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(host).cloned().unwrap_or_default()
    }

    /// `host:port` key for a URL, using the scheme's default port when none is given.
    pub fn host_key(url: &Url) -> Option<String> {
        let host = url.host_str()?;
        Some(match url.port_or_known_default() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        })
    }
}

impl reqwest::cookie::CookieStore for CookieStore {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let Some(host) = Self::host_key(url) else {
            return;
        };
        let cookies: Vec<Cookie> = cookie_headers
            .filter_map(|value| value.to_str().ok())
            .filter_map(Cookie::parse)
            .collect();
        trace!(host, count = cookies.len(), "storing cookies");
        self.set(&host, cookies);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        let host = Self::host_key(url)?;
        let cookies = self.get(&host);
        if cookies.is_empty() {
            return None;
        }
        let header = cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&header).ok()
    }
}
