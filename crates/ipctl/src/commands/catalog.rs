//! Platform profile, prebuilt and integration model command handlers.

use serde_json::Value;
use tabled::Tabled;

use ipctl_core::Platform;
use ipctl_core::services::{IntegrationModel, PlatformProfile, Prebuilt, ProfileEntry};

use crate::cli::{
    AssetCommand, GlobalOpts, NamedCommand, PrebuiltsCommand, ProfilesCommand,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Profiles ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "")]
    active: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&ProfileEntry> for ProfileRow {
    fn from(p: &ProfileEntry) -> Self {
        Self {
            active: if p.metadata.is_active { "*" } else { "" },
            id: p.profile.id.clone(),
            description: p.profile.description.clone(),
        }
    }
}

pub async fn profiles(
    platform: &Platform,
    command: ProfilesCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let profiles = platform.api().platform_profiles();
    match command {
        ProfilesCommand::Asset(AssetCommand::Named(NamedCommand::List)) => {
            let all = profiles.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |p| ProfileRow::from(p),
                |p| p.profile.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ProfilesCommand::Asset(AssetCommand::Named(NamedCommand::Get { name })) => {
            let entry = profiles.get(&name).await?;
            let out = output::render_single(
                global.format(),
                &entry,
                |p| {
                    vec![
                        ("ID", p.profile.id.clone()),
                        ("Description", p.profile.description.clone()),
                        ("Active", p.metadata.is_active.to_string()),
                        ("Active sync", p.metadata.active_sync.to_string()),
                    ]
                },
                |p| p.profile.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ProfilesCommand::Asset(AssetCommand::Named(NamedCommand::Delete { name })) => {
            if !util::confirm(&format!("Delete profile '{name}'?"), global.yes)? {
                return Ok(());
            }
            profiles.delete(&name).await?;
            output::status(global, &format!("Profile '{name}' deleted"));
        }

        ProfilesCommand::Asset(AssetCommand::Import(args)) => {
            let profile: PlatformProfile = util::read_document(&args.file)?;
            profiles.import(&profile).await?;
            output::status(global, &format!("Profile '{}' imported", profile.id));
        }

        ProfilesCommand::Asset(AssetCommand::Export(args)) => {
            let profile = profiles.export(&args.name).await?;
            util::write_document(&profile, args.file.as_deref(), global)?;
        }

        ProfilesCommand::Activate { name } => {
            profiles.activate(&name).await?;
            output::status(
                global,
                &format!("Profile '{name}' activated; restart the platform to apply"),
            );
        }
    }
    Ok(())
}

// ── Prebuilts ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PrebuiltRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Prebuilt> for PrebuiltRow {
    fn from(p: &Prebuilt) -> Self {
        Self {
            name: p.name().into(),
            version: p.metadata.version.clone(),
            description: p.metadata.description.clone(),
        }
    }
}

pub async fn prebuilts(
    platform: &Platform,
    command: PrebuiltsCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let prebuilts = platform.prebuilts();
    match command {
        PrebuiltsCommand::Named(NamedCommand::List) => {
            let all = prebuilts.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |p| PrebuiltRow::from(p),
                |p| p.name().to_owned(),
            )?;
            output::print_output(&out, global.quiet);
        }

        PrebuiltsCommand::Named(NamedCommand::Get { name }) => {
            let prebuilt = prebuilts.get_by_name(&name).await?;
            let out = output::render_single(
                global.format(),
                &prebuilt,
                |p| {
                    vec![
                        ("ID", p.id().to_owned()),
                        ("Name", p.name().to_owned()),
                        ("Version", p.metadata.version.clone()),
                        ("Description", p.metadata.description.clone()),
                        ("Bundles", p.bundles.len().to_string()),
                    ]
                },
                |p| p.name().to_owned(),
            )?;
            output::print_output(&out, global.quiet);
        }

        PrebuiltsCommand::Named(NamedCommand::Delete { name }) => {
            if !util::confirm(&format!("Delete prebuilt '{name}'?"), global.yes)? {
                return Ok(());
            }
            prebuilts.delete_by_name(&name).await?;
            output::status(global, &format!("Prebuilt '{name}' deleted"));
        }

        PrebuiltsCommand::Import { source, overwrite } => {
            let prebuilt: Prebuilt = util::read_document(&source.file)?;
            prebuilts.import(&prebuilt, overwrite).await?;
            output::status(global, &format!("Prebuilt '{}' imported", prebuilt.name()));
        }

        PrebuiltsCommand::Export(args) => {
            let exported = prebuilts.export_by_name(&args.name).await?;
            util::write_document(&exported, args.file.as_deref(), global)?;
        }
    }
    Ok(())
}

// ── Integration models ──────────────────────────────────────────────

#[derive(Tabled)]
struct IntegrationModelRow {
    #[tabled(rename = "Version ID")]
    version_id: String,
    #[tabled(rename = "Description")]
    description: String,
}

pub async fn integration_models(
    platform: &Platform,
    command: AssetCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let models = platform.api().integration_models();
    match command {
        AssetCommand::Named(NamedCommand::List) => {
            let all = models.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |m| IntegrationModelRow {
                    version_id: m.version_id.clone(),
                    description: m.description.clone(),
                },
                |m| m.version_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        AssetCommand::Named(NamedCommand::Get { name }) => {
            let model = models.get(&name).await?;
            let out = output::render_single(
                global.format(),
                &model,
                |m: &IntegrationModel| {
                    vec![
                        ("Version ID", m.version_id.clone()),
                        ("Description", m.description.clone()),
                        ("Properties", m.properties.len().to_string()),
                    ]
                },
                |m| m.version_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        AssetCommand::Named(NamedCommand::Delete { name }) => {
            if !util::confirm(&format!("Delete integration model '{name}'?"), global.yes)? {
                return Ok(());
            }
            models.delete(&name).await?;
            output::status(global, &format!("Integration model '{name}' deleted"));
        }

        AssetCommand::Import(args) => {
            let document: Value = util::read_document(&args.file)?;
            models.create(&document).await?;
            output::status(
                global,
                &format!("Integration model imported from {}", args.file.display()),
            );
        }

        AssetCommand::Export(args) => {
            let document = models.export(&args.name).await?;
            util::write_document(&document, args.file.as_deref(), global)?;
        }
    }
    Ok(())
}
