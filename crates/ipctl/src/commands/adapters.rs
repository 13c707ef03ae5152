//! Adapter and application command handlers.

use tabled::Tabled;

use ipctl_core::Platform;
use ipctl_core::services::{Adapter, Application};

use crate::cli::{AdaptersCommand, AssetCommand, GlobalOpts, NamedCommand, ServiceCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Type")]
    kind: String,
}

fn adapter_detail(a: &Adapter) -> Vec<(&'static str, String)> {
    vec![
        ("Name", a.name.clone()),
        ("Model", a.model.clone()),
        ("Type", a.kind.clone()),
        ("Encrypted", a.is_encrypted.to_string()),
        ("Properties", a.properties.len().to_string()),
    ]
}

fn application_detail(a: &Application) -> Vec<(&'static str, String)> {
    vec![
        ("Name", a.name.clone()),
        ("Model", a.model.clone()),
        ("Type", a.kind.clone()),
        ("Properties", a.properties.len().to_string()),
    ]
}

pub async fn adapters(
    platform: &Platform,
    command: AdaptersCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let adapters = platform.api().adapters();
    match command {
        AdaptersCommand::Asset(AssetCommand::Named(NamedCommand::List)) => {
            let all = adapters.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |a| ServiceRow {
                    name: a.name.clone(),
                    model: a.model.clone(),
                    kind: a.kind.clone(),
                },
                |a| a.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        AdaptersCommand::Asset(AssetCommand::Named(NamedCommand::Get { name })) => {
            let adapter = adapters.get(&name).await?;
            let out =
                output::render_single(global.format(), &adapter, adapter_detail, |a| a.name.clone())?;
            output::print_output(&out, global.quiet);
        }

        AdaptersCommand::Asset(AssetCommand::Named(NamedCommand::Delete { name })) => {
            if !util::confirm(&format!("Delete adapter '{name}'?"), global.yes)? {
                return Ok(());
            }
            adapters.delete(&name).await?;
            output::status(global, &format!("Adapter '{name}' deleted"));
        }

        AdaptersCommand::Asset(AssetCommand::Import(args)) => {
            let adapter: Adapter = util::read_document(&args.file)?;
            let created = adapters.import(&adapter).await?;
            output::status(global, &format!("Adapter '{}' imported", created.name));
        }

        AdaptersCommand::Asset(AssetCommand::Export(args)) => {
            let adapter = adapters.get(&args.name).await?;
            util::write_document(&adapter, args.file.as_deref(), global)?;
        }

        AdaptersCommand::Start { name } => {
            adapters.start(&name).await?;
            output::status(global, &format!("Adapter '{name}' started"));
        }

        AdaptersCommand::Stop { name } => {
            adapters.stop(&name).await?;
            output::status(global, &format!("Adapter '{name}' stopped"));
        }

        AdaptersCommand::Restart { name } => {
            adapters.restart(&name).await?;
            output::status(global, &format!("Adapter '{name}' restarted"));
        }
    }
    Ok(())
}

pub async fn applications(
    platform: &Platform,
    command: ServiceCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let applications = platform.api().applications();
    match command {
        ServiceCommand::List => {
            let all = applications.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |a| ServiceRow {
                    name: a.name.clone(),
                    model: a.model.clone(),
                    kind: a.kind.clone(),
                },
                |a| a.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ServiceCommand::Get { name } => {
            let application = applications.get(&name).await?;
            let out = output::render_single(global.format(), &application, application_detail, |a| {
                a.name.clone()
            })?;
            output::print_output(&out, global.quiet);
        }

        ServiceCommand::Start { name } => {
            applications.start(&name).await?;
            output::status(global, &format!("Application '{name}' started"));
        }

        ServiceCommand::Stop { name } => {
            applications.stop(&name).await?;
            output::status(global, &format!("Application '{name}' stopped"));
        }

        ServiceCommand::Restart { name } => {
            applications.restart(&name).await?;
            output::status(global, &format!("Application '{name}' restarted"));
        }
    }
    Ok(())
}
