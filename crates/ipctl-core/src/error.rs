// ── Core error types ──
//
// User-facing errors from ipctl-core. The `From<ipctl_api::Error>` impl
// translates transport and protocol failures into domain variants; the
// "not found" sentinels keep their exact wording so the CLI can print
// them unchanged.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to platform at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Operation cancelled")]
    Cancelled,

    // ── Lookup errors ────────────────────────────────────────────────
    /// Per-entity sentinel, e.g. `workflow not found`.
    #[error("{entity} not found")]
    NotFound { entity: String },

    #[error("item with name '{name}' not found")]
    NameNotFound { name: String },

    // ── Business rule errors ─────────────────────────────────────────
    #[error("{0}")]
    Validation(String),

    #[error(
        "model '{model}' has {count} attached instances, use --delete-instances to delete all instances"
    )]
    AttachedInstances { model: String, count: usize },

    // ── API errors ───────────────────────────────────────────────────
    /// The server answered with an unexpected status. `message` is the raw body.
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// `true` for every flavor of "the thing isn't there".
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::NameNotFound { .. } => true,
            Self::Api { status, .. } => *status == Some(404),
            _ => false,
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ipctl_api::Error> for CoreError {
    fn from(err: ipctl_api::Error) -> Self {
        match err {
            ipctl_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            ipctl_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ipctl_api::Error::InvalidUrl(e) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("invalid URL: {e}"),
            },
            ipctl_api::Error::InvalidPath(path) => {
                CoreError::Internal(format!("invalid request path '{path}'"))
            }
            ipctl_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            ipctl_api::Error::Cancelled => CoreError::Cancelled,
            ipctl_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ipctl_api::Error::UnexpectedStatus { status, body, .. } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                },
                status: Some(status),
            },
            ipctl_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            ipctl_api::Error::Serialization(e) => CoreError::Serialization(e),
            ipctl_api::Error::NotFound(entity) => CoreError::not_found(entity),
            ipctl_api::Error::Validation(message) => CoreError::Validation(message),
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_survive_translation() {
        let err = CoreError::from(ipctl_api::Error::NotFound("workflow"));
        assert_eq!(err.to_string(), "workflow not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn unexpected_status_keeps_body() {
        let err = CoreError::from(ipctl_api::Error::UnexpectedStatus {
            status: 404,
            expected: 200,
            body: "no such adapter".into(),
        });
        assert_eq!(err.to_string(), "no such adapter");
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_status_body_reports_code() {
        let err = CoreError::from(ipctl_api::Error::UnexpectedStatus {
            status: 502,
            expected: 200,
            body: String::new(),
        });
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[test]
    fn attached_instances_message() {
        let err = CoreError::AttachedInstances {
            model: "router".into(),
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "model 'router' has 3 attached instances, use --delete-instances to delete all instances"
        );
    }
}
