//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use ipctl_config::ConfigError;
use ipctl_core::{ApiError, CoreError};

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to platform at {url}")]
    #[diagnostic(
        code(ipctl::connection_failed),
        help(
            "{reason}\n\
             Check the host, port and use_tls settings of the profile."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ipctl::auth_failed),
        help(
            "Verify the username/password or client_id/client_secret of the profile.\n\
             Secrets can also be supplied via IPCTL_PASSWORD or IPCTL_CLIENT_SECRET."
        )
    )]
    AuthFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(ipctl::not_found),
        help("Run the asset's `list` command to see what exists.")
    )]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(ipctl::rejected))]
    Rejected { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(ipctl::api_error))]
    Api { message: String, status: Option<u16> },

    // ── Validation ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(ipctl::validation))]
    Validation { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ipctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Profiles live in: {path}"
        )
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error(transparent)]
    #[diagnostic(code(ipctl::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(ipctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout / cancellation ───────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(ipctl::timeout),
        help("Increase timeout with --timeout or the profile's `timeout` key.")
    )]
    Timeout { seconds: u64 },

    #[error("Operation cancelled")]
    #[diagnostic(code(ipctl::cancelled))]
    Cancelled,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON document: {0}")]
    #[diagnostic(code(ipctl::json), help("Check the file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML document: {0}")]
    #[diagnostic(code(ipctl::yaml), help("Check the file contents and try again."))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(ipctl::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Api { status, .. } => match status {
                Some(401 | 403) => exit_code::AUTH,
                Some(404) => exit_code::NOT_FOUND,
                _ => exit_code::GENERAL,
            },
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Cancelled => exit_code::CANCELLED,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. }
            | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Cancelled => CliError::Cancelled,

            err @ (CoreError::NotFound { .. } | CoreError::NameNotFound { .. }) => {
                CliError::NotFound {
                    message: err.to_string(),
                }
            }

            CoreError::Validation(message) => CliError::Validation { message },

            err @ CoreError::AttachedInstances { .. } => CliError::Rejected {
                message: err.to_string(),
            },

            CoreError::Api { message, status } => CliError::Api { message, status },

            CoreError::Serialization(e) => CliError::Json(e),

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

/// Direct service calls skip the resource layer; translate the same way.
impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        CoreError::from(err).into()
    }
}
