// ipctl-api: Async Rust client for the automation platform REST API

pub mod api;
pub mod auth;
pub mod cookies;
pub mod error;
pub mod http;
pub mod profile;
pub mod request;
pub mod services;
pub mod transport;

pub use api::{ApiClient, Listing, PAGE_LIMIT, Page, Wrapped, encode_segment};
pub use auth::{AuthStrategy, ClientCredentials};
pub use cookies::{Cookie, CookieStore};
pub use error::Error;
pub use http::HttpClient;
pub use profile::Profile;
pub use request::{Body, Method, Operation, QueryParams, Request, Response};
pub use transport::{TlsMode, TransportConfig};
