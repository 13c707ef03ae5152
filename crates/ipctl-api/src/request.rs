// Request/response framing types
//
// `Request` is the caller-facing description of one exchange (path, query,
// body, headers). `Operation` adds the verb and the status-code contract
// the framing layer enforces. `Response` is what the transport hands back.

use std::collections::HashMap;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::{Display, EnumString};
use url::Url;

use crate::error::Error;

// ── Method ───────────────────────────────────────────────────────────

/// HTTP verbs the platform API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Trace,
}

impl Method {
    /// Expected status when the operation doesn't name one.
    pub fn default_status(self) -> u16 {
        match self {
            Self::Post => 201,
            _ => 200,
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
            Self::Trace => reqwest::Method::TRACE,
        }
    }
}

// ── Body ─────────────────────────────────────────────────────────────

/// Request payload: a JSON document or pre-encoded bytes.
#[derive(Debug, Clone)]
pub enum Body {
    Json(serde_json::Value),
    Raw(Bytes),
}

impl Body {
    pub fn to_bytes(&self) -> Result<Bytes, Error> {
        match self {
            Self::Json(value) => Ok(Bytes::from(serde_json::to_vec(value)?)),
            Self::Raw(bytes) => Ok(bytes.clone()),
        }
    }
}

// ── QueryParams ──────────────────────────────────────────────────────

/// Structured pagination and filter parameters.
///
/// Only non-zero / non-empty fields are encoded. Filters may be qualified
/// with a field name: `contains[name]=foo` versus a bare `contains=foo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub skip: u32,
    pub limit: u32,
    pub sort: Option<String>,
    pub order: i32,
    pub contains: Option<String>,
    pub contains_field: Option<String>,
    pub equals: Option<String>,
    pub equals_field: Option<String>,
    pub starts_with: Option<String>,
    pub starts_with_field: Option<String>,
    pub skip_active_sync: bool,
    /// Appended verbatim after the structured fields.
    pub raw: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// `equals[field]=value`
    pub fn equals(field: &str, value: impl Into<String>) -> Self {
        Self {
            equals: Some(value.into()),
            equals_field: Some(field.to_owned()),
            ..Self::default()
        }
    }

    /// `contains[field]=value`
    pub fn contains(field: &str, value: impl Into<String>) -> Self {
        Self {
            contains: Some(value.into()),
            contains_field: Some(field.to_owned()),
            ..Self::default()
        }
    }

    /// `starts-with[field]=value`
    pub fn starts_with(field: &str, value: impl Into<String>) -> Self {
        Self {
            starts_with: Some(value.into()),
            starts_with_field: Some(field.to_owned()),
            ..Self::default()
        }
    }

    pub fn with_raw(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.raw.push((key.into(), value.into()));
        self
    }

    /// Key/value pairs in encoding order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        fn qualified(key: &str, field: Option<&String>) -> String {
            match field {
                Some(f) if !f.is_empty() => format!("{key}[{f}]"),
                _ => key.to_owned(),
            }
        }

        let mut pairs = Vec::new();
        if self.skip > 0 {
            pairs.push(("skip".to_owned(), self.skip.to_string()));
        }
        if self.limit > 0 {
            pairs.push(("limit".to_owned(), self.limit.to_string()));
        }
        if let Some(sort) = self.sort.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("sort".to_owned(), sort.clone()));
        }
        if self.order != 0 {
            pairs.push(("order".to_owned(), self.order.to_string()));
        }
        if let Some(v) = self.contains.as_ref().filter(|s| !s.is_empty()) {
            pairs.push((qualified("contains", self.contains_field.as_ref()), v.clone()));
        }
        if let Some(v) = self.equals.as_ref().filter(|s| !s.is_empty()) {
            pairs.push((qualified("equals", self.equals_field.as_ref()), v.clone()));
        }
        if let Some(v) = self.starts_with.as_ref().filter(|s| !s.is_empty()) {
            pairs.push((
                qualified("starts-with", self.starts_with_field.as_ref()),
                v.clone(),
            ));
        }
        if self.skip_active_sync {
            pairs.push(("skipActiveSync".to_owned(), "true".to_owned()));
        }
        pairs.extend(self.raw.iter().cloned());
        pairs
    }
}

// ── Request ──────────────────────────────────────────────────────────

/// One exchange as the caller describes it.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Absolute path, e.g. `/authorization/accounts`.
    pub path: String,
    /// Ordered query parameters.
    pub params: Vec<(String, String)>,
    pub body: Option<Body>,
    pub headers: Vec<(String, String)>,
    /// Suppress debug logging of the body (credentials).
    pub no_log: bool,
}

impl Request {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn params(mut self, query: &QueryParams) -> Self {
        self.params.extend(query.to_pairs());
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Some(Body::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    pub fn raw(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(Body::Raw(body.into()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn no_log(mut self) -> Self {
        self.no_log = true;
        self
    }

    /// Path is non-empty and absolute.
    pub fn validate(&self) -> Result<(), Error> {
        if self.path.starts_with('/') {
            Ok(())
        } else {
            Err(Error::InvalidPath(self.path.clone()))
        }
    }

    pub(crate) fn body_bytes(&self) -> Result<Bytes, Error> {
        self.body
            .as_ref()
            .map_or_else(|| Ok(Bytes::new()), Body::to_bytes)
    }
}

// ── Operation ────────────────────────────────────────────────────────

/// A request plus its verb and status-code contract.
#[derive(Debug, Clone)]
pub struct Operation {
    pub method: Method,
    pub request: Request,
    /// `None` falls back to [`Method::default_status`].
    pub expected_status: Option<u16>,
    pub disable_status_check: bool,
}

impl Operation {
    pub fn new(method: Method, request: Request) -> Self {
        Self {
            method,
            request,
            expected_status: None,
            disable_status_check: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, Request::new(path))
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, Request::new(path))
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, Request::new(path))
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, Request::new(path))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, Request::new(path))
    }

    pub fn expect(mut self, status: u16) -> Self {
        self.expected_status = Some(status);
        self
    }

    pub fn without_status_check(mut self) -> Self {
        self.disable_status_check = true;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.param(key, value);
        self
    }

    pub fn params(mut self, query: &QueryParams) -> Self {
        self.request = self.request.params(query);
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.request = self.request.json(body)?;
        Ok(self)
    }

    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.request = self.request.json_value(body);
        self
    }

    pub fn no_log(mut self) -> Self {
        self.request = self.request.no_log();
        self
    }

    pub fn expected(&self) -> u16 {
        self.expected_status
            .unwrap_or_else(|| self.method.default_status())
    }
}

// ── Response ─────────────────────────────────────────────────────────

/// A completed exchange.
#[derive(Debug, Clone)]
pub struct Response {
    pub method: Method,
    pub url: Url,
    /// e.g. `"200 OK"`
    pub status: String,
    pub status_code: u16,
    /// First value per header, keys lowercased.
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl Response {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Primary media type of `Content-Type`, without parameters.
    pub fn media_type(&self) -> Option<&str> {
        self.header("content-type")
            .and_then(|ct| ct.split(';').next())
            .map(str::trim)
    }

    pub fn is_json(&self) -> bool {
        self.media_type()
            .is_some_and(|mt| mt.eq_ignore_ascii_case("application/json"))
    }

    /// Decode the body. An empty body decodes as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let bytes: &[u8] = if self.body.is_empty() { b"null" } else { &self.body };
        serde_json::from_slice(bytes).map_err(|e| Error::deserialization(&e, &self.body))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn empty_params_encode_nothing() {
        assert!(QueryParams::new().to_pairs().is_empty());
    }

    #[test]
    fn qualified_filters() {
        let mut q = QueryParams::equals("name", "My Workflow");
        q.limit = 100;
        q.skip_active_sync = true;
        assert_eq!(
            q.to_pairs(),
            pairs(&[
                ("limit", "100"),
                ("equals[name]", "My Workflow"),
                ("skipActiveSync", "true"),
            ])
        );
    }

    #[test]
    fn unqualified_filter_and_raw() {
        let q = QueryParams {
            contains: Some("abc".into()),
            sort: Some("name".into()),
            order: -1,
            skip: 200,
            ..QueryParams::default()
        }
        .with_raw("expand", "created_by");
        assert_eq!(
            q.to_pairs(),
            pairs(&[
                ("skip", "200"),
                ("sort", "name"),
                ("order", "-1"),
                ("contains", "abc"),
                ("expand", "created_by"),
            ])
        );
    }

    #[test]
    fn default_status_per_verb() {
        assert_eq!(Method::Get.default_status(), 200);
        assert_eq!(Method::Put.default_status(), 200);
        assert_eq!(Method::Patch.default_status(), 200);
        assert_eq!(Method::Delete.default_status(), 200);
        assert_eq!(Method::Post.default_status(), 201);
        assert_eq!(Operation::post("/x").expect(200).expected(), 200);
    }

    #[test]
    fn relative_path_rejected() {
        assert!(Request::new("/ok").validate().is_ok());
        assert!(matches!(
            Request::new("relative").validate(),
            Err(Error::InvalidPath(_))
        ));
        assert!(Request::new("").validate().is_err());
    }

    #[test]
    fn method_display() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!("delete".parse::<Method>().unwrap(), Method::Delete);
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let resp = Response {
            method: Method::Delete,
            url: Url::parse("http://h/x").unwrap(),
            status: "204 No Content".into(),
            status_code: 204,
            headers: HashMap::new(),
            body: Bytes::new(),
        };
        let value: Option<serde_json::Value> = resp.json().unwrap();
        assert!(value.is_none());
        assert!(resp.media_type().is_none());
    }
}
