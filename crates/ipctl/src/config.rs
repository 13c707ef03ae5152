//! CLI-side configuration: `--config`/`--profile` aware wrappers over
//! `ipctl-config`.

use std::path::PathBuf;

use clap::ValueEnum;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use ipctl_config::{Config, ConfigError};
use ipctl_core::Platform;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// `--config`, else `$IPCTL_CONFIG`, else the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(ipctl_config::config_path)
}

pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(ipctl_config::load_config_from(&config_file(global))?)
}

/// Fill in options the command line left unset from `[defaults]`.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) {
    if global.output.is_none() {
        global.output = <OutputFormat as ValueEnum>::from_str(&cfg.defaults.output, true).ok();
    }
}

/// Build a platform client for the active profile.
pub fn connect(
    global: &GlobalOpts,
    cfg: &Config,
    cancel: CancellationToken,
) -> Result<Platform, CliError> {
    let name = cfg.profile_name(global.profile.as_deref());

    let mut profile = match cfg.api_profile(name) {
        Ok(profile) => profile,
        Err(ConfigError::UnknownProfile { name }) => {
            let available = cfg.profiles.keys().cloned().collect::<Vec<_>>();
            return Err(CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
                path: config_file(global).display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    if profile.username.is_none() && profile.client_id.is_none() {
        warn!(profile = name, "profile has no credentials; requests will be rejected");
    }
    if let Some(timeout) = global.timeout {
        profile = profile.with_timeout(timeout);
    }

    debug!(profile = name, host = %profile.host, "connecting");
    Ok(Platform::connect(profile, cancel)?)
}
