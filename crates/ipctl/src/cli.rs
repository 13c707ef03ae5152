//! Clap derive structures for the `ipctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ipctl -- manage automation platform assets from the command line
#[derive(Debug, Parser)]
#[command(
    name = "ipctl",
    version,
    about = "Manage automation platform assets from the command line",
    long_about = "Import, export, inspect and delete automation platform assets\n\
        (workflows, automations, projects, models, transformations, ...)\n\
        through the platform REST API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Platform profile to use
    #[arg(long, short = 'p', env = "IPCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Path to the configuration file
    #[arg(long, env = "IPCTL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "IPCTL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds, 0 for none (overrides profile)
    #[arg(long, env = "IPCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

const DEFAULT_FORMAT: OutputFormat = OutputFormat::Table;

impl GlobalOpts {
    /// The resolved output format.
    pub fn format(&self) -> &OutputFormat {
        self.output.as_ref().unwrap_or(&DEFAULT_FORMAT)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage user accounts
    #[command(alias = "acct")]
    Accounts {
        #[command(subcommand)]
        command: AccountsCommand,
    },

    /// Manage authorization groups
    Groups {
        #[command(subcommand)]
        command: NamedCommand,
    },

    /// Manage authorization roles
    Roles {
        #[command(subcommand)]
        command: NamedCommand,
    },

    /// Manage adapters
    Adapters {
        #[command(subcommand)]
        command: AdaptersCommand,
    },

    /// Manage applications
    #[command(alias = "apps")]
    Applications {
        #[command(subcommand)]
        command: ServiceCommand,
    },

    /// Manage Operations Manager automations
    Automations {
        #[command(subcommand)]
        command: ClearableCommand,
    },

    /// Manage Automation Studio projects
    Projects {
        #[command(subcommand)]
        command: ProjectsCommand,
    },

    /// Manage workflows
    #[command(alias = "wf")]
    Workflows {
        #[command(subcommand)]
        command: ClearableCommand,
    },

    /// Manage Lifecycle Manager models
    Models {
        #[command(subcommand)]
        command: ModelsCommand,
    },

    /// Manage Lifecycle Manager instances
    Instances {
        #[command(subcommand)]
        command: InstancesCommand,
    },

    /// Manage JST transformations
    #[command(alias = "jst")]
    Transformations {
        #[command(subcommand)]
        command: ClearableCommand,
    },

    /// Manage Automation Studio templates
    Templates {
        #[command(subcommand)]
        command: ClearableCommand,
    },

    /// Manage JSON forms
    Forms {
        #[command(subcommand)]
        command: ClearableCommand,
    },

    /// Manage platform profiles
    Profiles {
        #[command(subcommand)]
        command: ProfilesCommand,
    },

    /// Manage prebuilt packages
    Prebuilts {
        #[command(subcommand)]
        command: PrebuiltsCommand,
    },

    /// Manage Configuration Manager device groups
    DeviceGroups {
        #[command(subcommand)]
        command: DeviceGroupsCommand,
    },

    /// Inspect Configuration Manager devices
    Devices {
        #[command(subcommand)]
        command: DevicesCommand,
    },

    /// Manage golden configuration trees
    #[command(alias = "gc")]
    GoldenConfig {
        #[command(subcommand)]
        command: AssetCommand,
    },

    /// Manage MOP command templates
    CommandTemplates {
        #[command(subcommand)]
        command: AssetCommand,
    },

    /// Manage MOP analytic templates
    AnalyticTemplates {
        #[command(subcommand)]
        command: AssetCommand,
    },

    /// Manage integration models
    IntegrationModels {
        #[command(subcommand)]
        command: AssetCommand,
    },

    /// Query platform health
    Health {
        #[command(subcommand)]
        command: HealthCommand,
    },

    /// Show the account the active profile authenticates as
    Whoami,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Asset Commands ────────────────────────────────────────────

/// Read-only verbs plus delete, for assets addressed by name.
#[derive(Debug, Subcommand)]
pub enum NamedCommand {
    /// List all
    #[command(alias = "ls")]
    List,

    /// Show one
    Get {
        /// Name
        name: String,
    },

    /// Delete one
    #[command(alias = "rm")]
    Delete {
        /// Name
        name: String,
    },
}

/// Verbs every importable asset supports.
#[derive(Debug, Subcommand)]
pub enum AssetCommand {
    #[command(flatten)]
    Named(NamedCommand),

    /// Import from a JSON or YAML file
    Import(ImportArgs),

    /// Export as JSON
    Export(ExportArgs),
}

#[derive(Debug, Subcommand)]
pub enum ClearableCommand {
    #[command(flatten)]
    Asset(AssetCommand),

    /// Delete every item (stops at the first failure)
    Clear,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Document to import (.json, .yaml or .yml)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Name of the item to export
    pub name: String,

    /// Write to this file instead of stdout
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,
}

// ── Accounts ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum AccountsCommand {
    /// List accounts
    #[command(alias = "ls")]
    List,

    /// Show an account
    Get {
        /// Username
        username: String,
    },

    /// Re-enable an account
    Activate {
        /// Username
        username: String,
    },

    /// Disable an account
    Deactivate {
        /// Username
        username: String,
    },
}

// ── Adapters & Applications ──────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ServiceCommand {
    /// List all
    #[command(alias = "ls")]
    List,

    /// Show one
    Get {
        /// Name
        name: String,
    },

    /// Start
    Start {
        /// Name
        name: String,
    },

    /// Stop
    Stop {
        /// Name
        name: String,
    },

    /// Restart
    Restart {
        /// Name
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdaptersCommand {
    #[command(flatten)]
    Asset(AssetCommand),

    /// Start an adapter
    Start {
        /// Adapter name
        name: String,
    },

    /// Stop an adapter
    Stop {
        /// Adapter name
        name: String,
    },

    /// Restart an adapter
    Restart {
        /// Adapter name
        name: String,
    },
}

// ── Projects ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    #[command(flatten)]
    Asset(AssetCommand),

    /// Add an account or group to a project
    AddMember {
        /// Project name
        project: String,

        /// Account username to add
        #[arg(long, conflicts_with = "group", required_unless_present = "group")]
        account: Option<String>,

        /// Group name to add
        #[arg(long)]
        group: Option<String>,

        /// Member role
        #[arg(long, default_value = "editor", value_parser = ["owner", "editor", "operator", "viewer"])]
        role: String,
    },
}

// ── Models & Instances ───────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ModelsCommand {
    /// List models
    #[command(alias = "ls")]
    List,

    /// Show a model
    Get {
        /// Model name
        name: String,
    },

    /// Delete a model
    #[command(alias = "rm")]
    Delete {
        /// Model name
        name: String,

        /// Also delete every instance of the model
        #[arg(long)]
        delete_instances: bool,

        /// Also delete the workflows and transformations its actions use
        #[arg(long)]
        delete_related: bool,
    },

    /// Import from a JSON or YAML file
    Import(ImportArgs),

    /// Export as JSON
    Export(ExportArgs),

    /// List a model's instances
    Instances {
        /// Model name
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum InstancesCommand {
    /// List instances of a model
    #[command(alias = "ls")]
    List {
        /// Model name
        #[arg(long, short = 'm')]
        model: String,
    },

    /// Show an instance
    Get {
        /// Model name
        #[arg(long, short = 'm')]
        model: String,

        /// Instance name
        name: String,
    },

    /// Delete an instance
    #[command(alias = "rm")]
    Delete {
        /// Model name
        #[arg(long, short = 'm')]
        model: String,

        /// Instance name
        name: String,
    },
}

// ── Profiles & Prebuilts ─────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ProfilesCommand {
    #[command(flatten)]
    Asset(AssetCommand),

    /// Make a profile the active one
    Activate {
        /// Profile id
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PrebuiltsCommand {
    #[command(flatten)]
    Named(NamedCommand),

    /// Install a prebuilt from a JSON or YAML file
    Import {
        #[command(flatten)]
        source: ImportArgs,

        /// Replace an installed prebuilt of the same name
        #[arg(long)]
        overwrite: bool,
    },

    /// Export as JSON
    Export(ExportArgs),
}

// ── Configuration Manager ────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum DeviceGroupsCommand {
    #[command(flatten)]
    Named(NamedCommand),

    /// Create a device group
    Create {
        /// Group name
        name: String,

        /// Group description
        #[arg(long, short = 'd', default_value = "")]
        description: String,

        /// Member devices
        #[arg(long, value_delimiter = ',')]
        devices: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices
    #[command(alias = "ls")]
    List,

    /// Show a device
    Get {
        /// Device name
        name: String,
    },
}

// ── Health ───────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum HealthCommand {
    /// Overall platform status
    Status,
    /// Host system health
    System,
    /// Server process health
    Server,
    /// Per-application health
    Applications,
    /// Per-adapter health
    Adapters,
}

// ── Config & Completions ─────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current resolved configuration (secrets masked)
    Show,

    /// Print the configuration file location
    Path,

    /// List configured profiles
    Profiles,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }
}
