// ipctl-core: Business rules between ipctl-api and the CLI.

pub mod error;
pub mod helpers;
pub mod platform;
pub mod resources;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use helpers::{delete_all, find_by_name, validate_gbac_rules};
pub use platform::Platform;
pub use resources::DeleteOptions;

// Wire types, so consumers need only this crate.
pub use ipctl_api::services;
pub use ipctl_api::{Error as ApiError, Profile, QueryParams};
