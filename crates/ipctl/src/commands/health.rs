//! Health and identity command handlers.

use tabled::Tabled;

use ipctl_core::Platform;
use ipctl_core::services::{ComponentHealth, CurrentUser, StatusHealth};

use crate::cli::{GlobalOpts, HealthCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
}

impl From<&ComponentHealth> for ComponentRow {
    fn from(c: &ComponentHealth) -> Self {
        Self {
            id: c.id.clone(),
            state: c.state.clone(),
            version: util::or_dash(c.version.as_deref()),
            uptime: c.uptime.map_or_else(|| "-".into(), format_uptime),
        }
    }
}

fn format_uptime(secs: f64) -> String {
    // Sub-second precision is noise here.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = secs.max(0.0) as u64;
    let (days, rem) = (total / 86_400, total % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let minutes = rem / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

fn status_detail(s: &StatusHealth) -> Vec<(&'static str, String)> {
    vec![
        ("Host", s.host.clone()),
        ("Server ID", s.server_id.clone()),
        ("Applications", s.apps.clone()),
        ("Adapters", s.adapters.clone()),
        ("Services", s.services.len().to_string()),
    ]
}

fn render_components(components: &[ComponentHealth], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        global.format(),
        components,
        |c| ComponentRow::from(c),
        |c| c.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    platform: &Platform,
    command: HealthCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let health = platform.api().health();
    match command {
        HealthCommand::Status => {
            let status = health.status().await?;
            let out =
                output::render_single(global.format(), &status, status_detail, |s| s.host.clone())?;
            output::print_output(&out, global.quiet);
        }
        HealthCommand::System => {
            let system = health.system().await?;
            output::print_output(&output::render_value(global.format(), &system)?, global.quiet);
        }
        HealthCommand::Server => {
            let server = health.server().await?;
            output::print_output(&output::render_value(global.format(), &server)?, global.quiet);
        }
        HealthCommand::Applications => render_components(&health.applications().await?, global)?,
        HealthCommand::Adapters => render_components(&health.adapters().await?, global)?,
    }
    Ok(())
}

pub async fn whoami(platform: &Platform, global: &GlobalOpts) -> Result<(), CliError> {
    let user = platform.whoami().await?;
    let out = output::render_single(
        global.format(),
        &user,
        |u: &CurrentUser| {
            vec![
                ("Username", u.username.clone()),
                ("Name", util::or_dash(u.first_name.as_deref())),
                ("Provenance", u.provenance.clone()),
                ("Groups", u.groups.len().to_string()),
                ("Roles", u.roles.len().to_string()),
            ]
        },
        |u| u.username.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_is_humanized() {
        assert_eq!(format_uptime(59.9), "0m");
        assert_eq!(format_uptime(3_725.0), "1h 2m");
        assert_eq!(format_uptime(90_061.0), "1d 1h 1m");
    }
}
