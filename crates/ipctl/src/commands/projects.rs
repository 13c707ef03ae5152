//! Automation Studio project command handlers.

use serde_json::Map;
use tabled::Tabled;

use ipctl_core::Platform;
use ipctl_core::services::{Project, ProjectMember};

use crate::cli::{AssetCommand, GlobalOpts, NamedCommand, ProjectsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id().into(),
            name: p.name.clone(),
            members: p.members.len(),
            description: p.description.clone(),
        }
    }
}

fn detail(p: &Project) -> Vec<(&'static str, String)> {
    let members = p
        .members
        .iter()
        .map(|m| {
            let who = m.username.as_deref().unwrap_or(&m.reference);
            format!("{who} ({} {})", m.kind, m.role)
        })
        .collect::<Vec<_>>();
    vec![
        ("ID", p.id().to_owned()),
        ("Name", p.name.clone()),
        ("Description", p.description.clone()),
        ("Created", util::or_dash(p.created.as_deref())),
        ("Components", p.components.len().to_string()),
        ("Members", members.join(", ")),
    ]
}

pub async fn handle(
    platform: &Platform,
    command: ProjectsCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let projects = platform.projects();
    match command {
        ProjectsCommand::Asset(AssetCommand::Named(NamedCommand::List)) => {
            let all = projects.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |p| ProjectRow::from(p),
                |p| p.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ProjectsCommand::Asset(AssetCommand::Named(NamedCommand::Get { name })) => {
            let project = projects.get_by_name(&name).await?;
            let out = output::render_single(global.format(), &project, detail, |p| p.name.clone())?;
            output::print_output(&out, global.quiet);
        }

        ProjectsCommand::Asset(AssetCommand::Named(NamedCommand::Delete { name })) => {
            if !util::confirm(&format!("Delete project '{name}'?"), global.yes)? {
                return Ok(());
            }
            let project = projects.get_by_name(&name).await?;
            projects.delete(project.id()).await?;
            output::status(global, &format!("Project '{name}' deleted"));
        }

        ProjectsCommand::Asset(AssetCommand::Import(args)) => {
            let project: Project = util::read_document(&args.file)?;
            let created = projects.import(&project).await?;
            output::status(
                global,
                &format!("Project '{}' imported as {}", created.name, created.id()),
            );
        }

        ProjectsCommand::Asset(AssetCommand::Export(args)) => {
            let found = projects.get_by_name(&args.name).await?;
            let exported = projects.export(found.id()).await?;
            util::write_document(&exported, args.file.as_deref(), global)?;
        }

        ProjectsCommand::AddMember {
            project,
            account,
            group,
            role,
        } => {
            let target = projects.get_by_name(&project).await?;
            let member = match (account, group) {
                (Some(username), _) => {
                    let account = platform.accounts().get_by_username(&username).await?;
                    ProjectMember {
                        kind: "account".into(),
                        reference: account.id,
                        role,
                        username: Some(account.username),
                        extra: Map::new(),
                    }
                }
                (None, Some(name)) => {
                    let group = platform.groups().get_by_name(&name).await?;
                    ProjectMember {
                        kind: "group".into(),
                        reference: group.id().to_owned(),
                        role,
                        username: None,
                        extra: Map::new(),
                    }
                }
                (None, None) => {
                    return Err(CliError::Validation {
                        message: "one of --account or --group is required".into(),
                    });
                }
            };

            let members = projects.add_members(target.id(), vec![member]).await?;
            output::status(
                global,
                &format!("Project '{project}' now has {} members", members.len()),
            );
        }
    }
    Ok(())
}
