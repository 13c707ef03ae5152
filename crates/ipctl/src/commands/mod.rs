//! Command dispatch: bridges CLI args -> platform resources -> output formatting.

pub mod adapters;
pub mod authorization;
pub mod automations;
pub mod catalog;
pub mod config_cmd;
pub mod config_manager;
pub mod forms;
pub mod health;
pub mod models;
pub mod projects;
pub mod templates;
pub mod transformations;
pub mod util;
pub mod workflows;

use ipctl_core::Platform;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a platform-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    platform: &Platform,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Accounts { command } => authorization::accounts(platform, command, global).await,
        Command::Groups { command } => authorization::groups(platform, command, global).await,
        Command::Roles { command } => authorization::roles(platform, command, global).await,
        Command::Adapters { command } => adapters::adapters(platform, command, global).await,
        Command::Applications { command } => {
            adapters::applications(platform, command, global).await
        }
        Command::Automations { command } => automations::handle(platform, command, global).await,
        Command::Projects { command } => projects::handle(platform, command, global).await,
        Command::Workflows { command } => workflows::handle(platform, command, global).await,
        Command::Models { command } => models::models(platform, command, global).await,
        Command::Instances { command } => models::instances(platform, command, global).await,
        Command::Transformations { command } => {
            transformations::handle(platform, command, global).await
        }
        Command::Templates { command } => templates::handle(platform, command, global).await,
        Command::Forms { command } => forms::handle(platform, command, global).await,
        Command::Profiles { command } => catalog::profiles(platform, command, global).await,
        Command::Prebuilts { command } => catalog::prebuilts(platform, command, global).await,
        Command::IntegrationModels { command } => {
            catalog::integration_models(platform, command, global).await
        }
        Command::DeviceGroups { command } => {
            config_manager::device_groups(platform, command, global).await
        }
        Command::Devices { command } => config_manager::devices(platform, command, global).await,
        Command::GoldenConfig { command } => {
            config_manager::golden_config(platform, command, global).await
        }
        Command::CommandTemplates { command } => {
            config_manager::command_templates(platform, command, global).await
        }
        Command::AnalyticTemplates { command } => {
            config_manager::analytic_templates(platform, command, global).await
        }
        Command::Health { command } => health::handle(platform, command, global).await,
        Command::Whoami => health::whoami(platform, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not require a platform connection".into(),
        )),
    }
}
