// Request/response framing
//
// `ApiClient` sits on top of `HttpClient` and enforces the per-operation
// status contract, decodes JSON bodies, and drives the paginated
// collection iterator every list endpoint uses. Service facades in
// `crate::services` are thin wrappers over the helpers defined here.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, error, warn};

use crate::error::Error;
use crate::http::HttpClient;
use crate::profile::Profile;
use crate::request::{Operation, QueryParams, Response};

/// Page size used by every list endpoint.
pub const PAGE_LIMIT: u32 = 100;

// ── Envelopes ────────────────────────────────────────────────────────

/// Pagination metadata carried by most list responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMetadata {
    #[serde(default)]
    pub total: Option<u64>,
}

/// One page of a collection.
///
/// The platform is inconsistent about the items key (`data`, `results`,
/// `items`, `list`) and about where `total` lives (`metadata.total` or a
/// top-level `total`). All of them land here.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(
        default = "Vec::new",
        alias = "results",
        alias = "items",
        alias = "list"
    )]
    pub data: Vec<T>,
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    /// Server-reported total, if any.
    pub fn total(&self) -> Option<usize> {
        self.metadata
            .as_ref()
            .and_then(|m| m.total)
            .or(self.total)
            .and_then(|t| usize::try_from(t).ok())
    }
}

/// A collection response: either a bare JSON array or a [`Page`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Paged(Page<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) => items,
            Self::Paged(page) => page.data,
        }
    }
}

/// A single-entity response: `{"data": T}` or bare `T`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Wrapped<T> {
    Data { data: T },
    Bare(T),
}

impl<T> Wrapped<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Data { data } | Self::Bare(data) => data,
        }
    }
}

/// Decode an explicit JSON `null` as `T::default()`.
///
/// `#[serde(default)]` only covers a missing key; older records carry `null`
/// on fields the platform now always fills in.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Percent-encode a value for use as one URL path segment.
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Map any "not found" shaped error (sentinel or HTTP 404) onto `entity`'s sentinel.
pub(crate) fn not_found(entity: &'static str) -> impl FnOnce(Error) -> Error {
    move |err| {
        if err.is_not_found() {
            Error::NotFound(entity)
        } else {
            err
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Framing layer over a shared [`HttpClient`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Arc<HttpClient>,
}

impl ApiClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    pub fn from_profile(profile: Profile) -> Result<Self, Error> {
        Ok(Self::new(HttpClient::new(profile)?))
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Run one operation and enforce its status contract.
    ///
    /// A status other than the expected one fails with
    /// [`Error::UnexpectedStatus`] carrying the raw body. A non-JSON
    /// `Content-Type` only warns.
    pub async fn execute(&self, op: Operation) -> Result<Response, Error> {
        let expected = op.expected();
        let response = self.http.send(op.method, &op.request).await?;

        if !op.disable_status_check {
            if response.status_code > 299 {
                debug!(body = %response.text(), "error response body");
                error!(
                    method = %op.method,
                    path = %op.request.path,
                    status = response.status_code,
                    "request failed"
                );
            }
            if response.status_code != expected {
                return Err(Error::UnexpectedStatus {
                    status: response.status_code,
                    expected,
                    body: response.text(),
                });
            }
        }

        if !response.body.is_empty() && !response.is_json() {
            warn!(
                content_type = response.media_type().unwrap_or("<none>"),
                path = %op.request.path,
                "response is not application/json"
            );
        }

        Ok(response)
    }

    /// Run an operation and decode its body into `T`.
    pub async fn call<T: DeserializeOwned>(&self, op: Operation) -> Result<T, Error> {
        self.execute(op).await?.json()
    }

    /// Run an operation and discard the body.
    pub async fn call_unit(&self, op: Operation) -> Result<(), Error> {
        self.execute(op).await.map(|_| ())
    }

    // ── Verb helpers ─────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.call(Operation::get(path)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Operation::post(path).json(body)?).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Operation::put(path).json(body)?).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Operation::patch(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.call_unit(Operation::delete(path)).await
    }

    /// GET a single entity, unwrapping `{"data": …}`.
    ///
    /// A 404 or an empty/null body both become `entity`'s "not found" sentinel.
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        path: &str,
        entity: &'static str,
    ) -> Result<T, Error> {
        let found: Option<Wrapped<T>> = self
            .call(Operation::get(path))
            .await
            .map_err(not_found(entity))?;
        found
            .map(Wrapped::into_inner)
            .ok_or(Error::NotFound(entity))
    }

    /// GET a collection in one call (bare array or page envelope).
    pub async fn list<T: DeserializeOwned>(&self, op: Operation) -> Result<Vec<T>, Error> {
        let listing: Option<Listing<T>> = self.call(op).await?;
        Ok(listing.map(Listing::into_vec).unwrap_or_default())
    }

    // ── Pagination ───────────────────────────────────────────────────

    /// Fetch every item of a paginated collection.
    ///
    /// Issues `GET path?limit=100&skip=N…` sequentially, concatenating pages
    /// in request order. Stops once the accumulated count reaches the
    /// server-reported total, or on an empty page. A response without a
    /// total is treated as the whole collection.
    pub async fn paginate<T: DeserializeOwned>(
        &self,
        path: &str,
        filters: &QueryParams,
    ) -> Result<Vec<T>, Error> {
        let filters = QueryParams {
            skip: 0,
            limit: 0,
            ..filters.clone()
        };

        let mut all = Vec::new();
        let mut skip: u32 = 0;

        loop {
            let op = Operation::get(path)
                .param("limit", PAGE_LIMIT.to_string())
                .param("skip", skip.to_string())
                .params(&filters);
            let page: Page<T> = self.call(op).await?;

            let total = page.total();
            let received = page.data.len();
            all.extend(page.data);
            debug!(path, received, accumulated = all.len(), ?total, "page fetched");

            if received == 0 || all.len() >= total.unwrap_or(all.len()) {
                break;
            }
            skip += PAGE_LIMIT;
        }

        Ok(all)
    }
}
