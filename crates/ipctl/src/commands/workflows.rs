//! Workflow command handlers.

use tabled::Tabled;

use ipctl_core::Platform;
use ipctl_core::services::Workflow;

use crate::cli::{AssetCommand, ClearableCommand, GlobalOpts, NamedCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct WorkflowRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Tasks")]
    tasks: usize,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&Workflow> for WorkflowRow {
    fn from(w: &Workflow) -> Self {
        Self {
            id: w.id().into(),
            name: w.name.clone(),
            kind: w.kind.clone(),
            tasks: w.tasks.len(),
            updated: util::or_dash(w.last_updated.as_deref()),
        }
    }
}

fn detail(w: &Workflow) -> Vec<(&'static str, String)> {
    vec![
        ("ID", w.id().to_owned()),
        ("Name", w.name.clone()),
        ("Type", w.kind.clone()),
        ("Tasks", w.tasks.len().to_string()),
        ("Transitions", w.transitions.len().to_string()),
        ("Groups", w.groups.len().to_string()),
        ("Created", util::or_dash(w.created.as_deref())),
        ("Updated", util::or_dash(w.last_updated.as_deref())),
    ]
}

pub async fn handle(
    platform: &Platform,
    command: ClearableCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let workflows = platform.workflows();
    match command {
        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::List)) => {
            let all = workflows.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |w| WorkflowRow::from(w),
                |w| w.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::Get { name })) => {
            let workflow = workflows.get(&name).await?;
            let out = output::render_single(global.format(), &workflow, detail, |w| w.name.clone())?;
            output::print_output(&out, global.quiet);
        }

        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::Delete { name })) => {
            if !util::confirm(&format!("Delete workflow '{name}'?"), global.yes)? {
                return Ok(());
            }
            workflows.delete(&name).await?;
            output::status(global, &format!("Workflow '{name}' deleted"));
        }

        ClearableCommand::Asset(AssetCommand::Import(args)) => {
            let workflow: Workflow = util::read_document(&args.file)?;
            workflows.import(&workflow).await?;
            output::status(global, &format!("Workflow '{}' imported", workflow.name));
        }

        ClearableCommand::Asset(AssetCommand::Export(args)) => {
            let exported = workflows.export(&args.name).await?;
            util::write_document(&exported, args.file.as_deref(), global)?;
        }

        ClearableCommand::Clear => {
            if !util::confirm("Delete ALL workflows?", global.yes)? {
                return Ok(());
            }
            let count = workflows.clear().await?;
            output::status(global, &format!("Deleted {count} workflows"));
        }
    }
    Ok(())
}
