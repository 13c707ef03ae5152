//! Automation Studio template command handlers.

use tabled::Tabled;

use ipctl_core::Platform;
use ipctl_core::services::Template;

use crate::cli::{AssetCommand, ClearableCommand, GlobalOpts, NamedCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Group")]
    group: String,
}

impl From<&Template> for TemplateRow {
    fn from(t: &Template) -> Self {
        Self {
            id: t.id().into(),
            name: t.name.clone(),
            kind: t.kind.clone(),
            group: t.group.clone(),
        }
    }
}

pub async fn handle(
    platform: &Platform,
    command: ClearableCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let templates = platform.templates();
    match command {
        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::List)) => {
            let all = templates.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |t| TemplateRow::from(t),
                |t| t.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::Get { name })) => {
            let template = templates.get_by_name(&name).await?;
            let out = output::render_single(
                global.format(),
                &template,
                |t| {
                    vec![
                        ("ID", t.id().to_owned()),
                        ("Name", t.name.clone()),
                        ("Type", t.kind.clone()),
                        ("Group", t.group.clone()),
                        ("Description", t.description.clone()),
                        ("Command", t.command.clone()),
                    ]
                },
                |t| t.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::Delete { name })) => {
            if !util::confirm(&format!("Delete template '{name}'?"), global.yes)? {
                return Ok(());
            }
            templates.delete_by_name(&name).await?;
            output::status(global, &format!("Template '{name}' deleted"));
        }

        ClearableCommand::Asset(AssetCommand::Import(args)) => {
            let template: Template = util::read_document(&args.file)?;
            templates.import(&template).await?;
            output::status(global, &format!("Template '{}' imported", template.name));
        }

        ClearableCommand::Asset(AssetCommand::Export(args)) => {
            let exported = templates.export_by_name(&args.name).await?;
            util::write_document(&exported, args.file.as_deref(), global)?;
        }

        ClearableCommand::Clear => {
            if !util::confirm("Delete ALL templates?", global.yes)? {
                return Ok(());
            }
            let count = templates.clear().await?;
            output::status(global, &format!("Deleted {count} templates"));
        }
    }
    Ok(())
}
