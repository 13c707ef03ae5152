//! JST transformation command handlers.

use tabled::Tabled;

use ipctl_core::Platform;
use ipctl_core::services::Transformation;

use crate::cli::{AssetCommand, ClearableCommand, GlobalOpts, NamedCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct TransformationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Steps")]
    steps: usize,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Transformation> for TransformationRow {
    fn from(t: &Transformation) -> Self {
        Self {
            id: t.id().into(),
            name: t.name.clone(),
            steps: t.steps.len(),
            description: t.description.clone(),
        }
    }
}

fn detail(t: &Transformation) -> Vec<(&'static str, String)> {
    vec![
        ("ID", t.id().to_owned()),
        ("Name", t.name.clone()),
        ("Description", t.description.clone()),
        ("Incoming", t.incoming.len().to_string()),
        ("Outgoing", t.outgoing.len().to_string()),
        ("Steps", t.steps.len().to_string()),
        ("Functions", t.functions.len().to_string()),
    ]
}

pub async fn handle(
    platform: &Platform,
    command: ClearableCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let transformations = platform.transformations();
    match command {
        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::List)) => {
            let all = transformations.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |t| TransformationRow::from(t),
                |t| t.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::Get { name })) => {
            let transformation = transformations.get_by_name(&name).await?;
            let out = output::render_single(global.format(), &transformation, detail, |t| {
                t.name.clone()
            })?;
            output::print_output(&out, global.quiet);
        }

        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::Delete { name })) => {
            if !util::confirm(&format!("Delete transformation '{name}'?"), global.yes)? {
                return Ok(());
            }
            let transformation = transformations.get_by_name(&name).await?;
            transformations.delete(transformation.id()).await?;
            output::status(global, &format!("Transformation '{name}' deleted"));
        }

        ClearableCommand::Asset(AssetCommand::Import(args)) => {
            let transformation: Transformation = util::read_document(&args.file)?;
            let created = transformations.import(&transformation).await?;
            output::status(
                global,
                &format!("Transformation '{}' imported as {}", created.name, created.id()),
            );
        }

        ClearableCommand::Asset(AssetCommand::Export(args)) => {
            let found = transformations.get_by_name(&args.name).await?;
            let exported = transformations.get(found.id()).await?;
            util::write_document(&exported, args.file.as_deref(), global)?;
        }

        ClearableCommand::Clear => {
            if !util::confirm("Delete ALL user transformations?", global.yes)? {
                return Ok(());
            }
            let count = transformations.clear().await?;
            output::status(global, &format!("Deleted {count} transformations"));
        }
    }
    Ok(())
}
