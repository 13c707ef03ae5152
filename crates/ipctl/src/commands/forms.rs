//! JSON form command handlers.

use tabled::Tabled;

use ipctl_core::Platform;
use ipctl_core::services::JsonForm;

use crate::cli::{AssetCommand, ClearableCommand, GlobalOpts, NamedCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct FormRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

pub async fn handle(
    platform: &Platform,
    command: ClearableCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let forms = platform.json_forms();
    match command {
        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::List)) => {
            let all = forms.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |f| FormRow {
                    id: f.id().into(),
                    name: f.name.clone(),
                    description: f.description.clone(),
                },
                |f| f.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::Get { name })) => {
            let form = forms.get_by_name(&name).await?;
            let out = output::render_single(
                global.format(),
                &form,
                |f: &JsonForm| {
                    vec![
                        ("ID", f.id().to_owned()),
                        ("Name", f.name.clone()),
                        ("Description", f.description.clone()),
                    ]
                },
                |f| f.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ClearableCommand::Asset(AssetCommand::Named(NamedCommand::Delete { name })) => {
            if !util::confirm(&format!("Delete form '{name}'?"), global.yes)? {
                return Ok(());
            }
            let form = forms.get_by_name(&name).await?;
            forms.delete(&[form.id()]).await?;
            output::status(global, &format!("Form '{name}' deleted"));
        }

        ClearableCommand::Asset(AssetCommand::Import(args)) => {
            let form: JsonForm = util::read_document(&args.file)?;
            forms.import(&form).await?;
            output::status(global, &format!("Form '{}' imported", form.name));
        }

        ClearableCommand::Asset(AssetCommand::Export(args)) => {
            let found = forms.get_by_name(&args.name).await?;
            let exported = forms.get(found.id()).await?;
            util::write_document(&exported, args.file.as_deref(), global)?;
        }

        ClearableCommand::Clear => {
            if !util::confirm("Delete ALL forms?", global.yes)? {
                return Ok(());
            }
            let count = forms.clear().await?;
            output::status(global, &format!("Deleted {count} forms"));
        }
    }
    Ok(())
}
