use thiserror::Error;

/// Top-level error type for the `ipctl-api` crate.
///
/// Covers every failure mode of a single exchange with the platform:
/// transport, authentication, protocol (unexpected status), decoding,
/// and the per-entity "not found" sentinels the resource layer keys on.
/// `ipctl-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login or token exchange failed.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, body read, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request path is empty or relative.
    #[error("Invalid request path '{0}': must begin with '/'")]
    InvalidPath(String),

    /// The whole exchange exceeded the profile timeout.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The client's cancellation token fired.
    #[error("Request cancelled")]
    Cancelled,

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Protocol ────────────────────────────────────────────────────
    /// Status code differed from the one the operation expects.
    /// Displays the raw server body so the CLI can print it verbatim;
    /// an empty body falls back to the status code.
    #[error("{}", status_text(*.status, .body))]
    UnexpectedStatus {
        status: u16,
        expected: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Domain ──────────────────────────────────────────────────────
    /// Entity lookup came back empty. Displays as `"<entity> not found"`.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Input or response shape rejected before or after the exchange.
    #[error("{0}")]
    Validation(String),
}

fn status_text(status: u16, body: &str) -> String {
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_owned()
    }
}

impl Error {
    /// Returns `true` for the per-entity "not found" sentinel.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::UnexpectedStatus { status, .. } => *status == 404,
            _ => false,
        }
    }

    /// Returns `true` if the error means the exchange never completed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout { .. } | Self::Cancelled | Self::Tls(_)
        )
    }

    /// HTTP status of a protocol mismatch, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn deserialization(err: &serde_json::Error, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body).into_owned();
        let preview: String = body.chars().take(200).collect();
        Self::Deserialization {
            message: format!("{err} (body preview: {preview:?})"),
            body,
        }
    }
}
