//! Profile configuration for ipctl.
//!
//! A TOML file of named platform profiles, merged with `IPCTL_`-prefixed
//! environment variables, and translated into the transport-level
//! [`ipctl_api::Profile`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "IPCTL_CONFIG";
/// Overrides every profile's `password`.
pub const PASSWORD_ENV: &str = "IPCTL_PASSWORD";
/// Overrides every profile's `client_secret`.
pub const CLIENT_SECRET_ENV: &str = "IPCTL_CLIENT_SECRET";

const MASK: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Seconds; `0` is unbounded.
    #[serde(default)]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: 0,
        }
    }
}

fn default_output() -> String {
    "table".into()
}

fn default_verify() -> bool {
    true
}

/// One `[profiles.<name>]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Platform host name or address. Required.
    pub host: Option<String>,

    /// `0` derives the port from the scheme.
    #[serde(default)]
    pub port: u16,

    #[serde(default)]
    pub use_tls: bool,

    #[serde(default = "default_verify")]
    pub verify: bool,

    pub username: Option<String>,

    /// Plaintext; `IPCTL_PASSWORD` takes precedence.
    pub password: Option<String>,

    pub client_id: Option<String>,

    /// Plaintext; `IPCTL_CLIENT_SECRET` takes precedence.
    pub client_secret: Option<String>,

    /// Overrides `defaults.timeout`.
    pub timeout: Option<u64>,
}

impl Profile {
    /// Whether any credential pair is configured.
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() || self.client_id.is_some()
    }
}

// ── Config file path ────────────────────────────────────────────────

/// `$IPCTL_CONFIG`, else `config.toml` in the platform config directory.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("io", "ipctl", "ipctl").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("ipctl");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from the default location.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load `path` (a missing file is fine) merged with `IPCTL_*` variables.
///
/// Nested keys use `__`, e.g. `IPCTL_PROFILES__LAB__HOST`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("IPCTL_").split("__"))
        .extract()?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Every profile needs a non-empty host.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, profile) in &self.profiles {
            if profile.host.as_deref().is_none_or(str::is_empty) {
                return Err(ConfigError::Validation {
                    field: format!("profiles.{name}.host"),
                    reason: "host is required".into(),
                });
            }
        }
        Ok(())
    }

    /// Name of the profile to use: `requested`, else `default_profile`, else `default`.
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }

    /// Build the transport profile for `name`, resolving secrets from the
    /// environment first.
    pub fn api_profile(&self, name: &str) -> Result<ipctl_api::Profile, ConfigError> {
        let profile = self.profile(name)?;
        let host = profile
            .host
            .clone()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ConfigError::Validation {
                field: format!("profiles.{name}.host"),
                reason: "host is required".into(),
            })?;

        let mut resolved = ipctl_api::Profile::new(host)
            .with_port(profile.port)
            .with_tls(profile.use_tls, profile.verify)
            .with_timeout(profile.timeout.unwrap_or(self.defaults.timeout));

        if let Some(username) = &profile.username {
            let password = resolve_secret(PASSWORD_ENV, profile.password.as_deref())
                .unwrap_or_else(|| SecretString::from(String::new()));
            resolved = resolved.with_basic_auth(username.clone(), password);
        }
        if let (Some(client_id), Some(secret)) = (
            &profile.client_id,
            resolve_secret(CLIENT_SECRET_ENV, profile.client_secret.as_deref()),
        ) {
            resolved = resolved.with_client_credentials(client_id.clone(), secret);
        }

        Ok(resolved)
    }

    /// Copy with every secret replaced by a mask.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for profile in copy.profiles.values_mut() {
            if profile.password.is_some() {
                profile.password = Some(MASK.into());
            }
            if profile.client_secret.is_some() {
                profile.client_secret = Some(MASK.into());
            }
        }
        copy
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Environment variable `env`, else the plaintext value.
fn resolve_secret(env: &str, plaintext: Option<&str>) -> Option<SecretString> {
    std::env::var(env)
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| plaintext.map(str::to_owned))
        .map(SecretString::from)
}
