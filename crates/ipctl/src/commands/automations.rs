//! Operations Manager automation command handlers.

use tabled::Tabled;

use ipctl_core::Platform;
use ipctl_core::services::Automation;

use crate::cli::{AssetCommand, ClearableCommand, GlobalOpts, NamedCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AutomationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Triggers")]
    triggers: usize,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Automation> for AutomationRow {
    fn from(a: &Automation) -> Self {
        Self {
            id: a.id().into(),
            name: a.name.clone(),
            component: util::or_dash(a.component_name.as_deref()),
            triggers: a.triggers.len(),
            description: a.description.clone(),
        }
    }
}

fn detail(a: &Automation) -> Vec<(&'static str, String)> {
    vec![
        ("ID", a.id().to_owned()),
        ("Name", a.name.clone()),
        ("Description", a.description.clone()),
        ("Component", util::or_dash(a.component_name.as_deref())),
        ("Type", util::or_dash(a.component_type.as_deref())),
        ("Read groups", a.gbac.read.len().to_string()),
        ("Write groups", a.gbac.write.len().to_string()),
        ("Triggers", a.triggers.len().to_string()),
    ]
}

pub async fn handle(
    platform: &Platform,
    command: ClearableCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let automations = platform.automations();
    match command {
        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::List)) => {
            let all = automations.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |a| AutomationRow::from(a),
                |a| a.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::Get { name })) => {
            let automation = automations.get_by_name(&name).await?;
            let out =
                output::render_single(global.format(), &automation, detail, |a| a.name.clone())?;
            output::print_output(&out, global.quiet);
        }

        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::Delete { name })) => {
            if !util::confirm(&format!("Delete automation '{name}'?"), global.yes)? {
                return Ok(());
            }
            let automation = automations.get_by_name(&name).await?;
            automations.delete(automation.id()).await?;
            output::status(global, &format!("Automation '{name}' deleted"));
        }

        ClearableCommand::Asset(AssetCommand::Import(args)) => {
            let automation: Automation = util::read_document(&args.file)?;
            automations.import(&automation).await?;
            output::status(global, &format!("Automation '{}' imported", automation.name));
        }

        ClearableCommand::Asset(AssetCommand::Export(args)) => {
            let found = automations.get_by_name(&args.name).await?;
            let exported = automations.export(found.id()).await?;
            util::write_document(&exported, args.file.as_deref(), global)?;
        }

        ClearableCommand::Clear => {
            if !util::confirm("Delete ALL automations?", global.yes)? {
                return Ok(());
            }
            let count = automations.clear().await?;
            output::status(global, &format!("Deleted {count} automations"));
        }
    }
    Ok(())
}
