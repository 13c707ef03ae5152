//! Lifecycle Manager model and instance command handlers.

use tabled::Tabled;

use ipctl_core::services::{Instance, Model};
use ipctl_core::{DeleteOptions, Platform};

use crate::cli::{GlobalOpts, InstancesCommand, ModelsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Actions")]
    actions: usize,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Model> for ModelRow {
    fn from(m: &Model) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            actions: m.actions.len(),
            description: m.description.clone(),
        }
    }
}

fn model_detail(m: &Model) -> Vec<(&'static str, String)> {
    let actions = m
        .actions
        .iter()
        .map(|a| match a.workflow.as_deref() {
            Some(workflow) if !workflow.is_empty() => format!("{} -> {workflow}", a.name),
            _ => a.name.clone(),
        })
        .collect::<Vec<_>>();
    vec![
        ("ID", m.id.clone()),
        ("Name", m.name.clone()),
        ("Description", m.description.clone()),
        ("Actions", actions.join(", ")),
    ]
}

#[derive(Tabled)]
struct InstanceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Last Action")]
    last_action: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Instance> for InstanceRow {
    fn from(i: &Instance) -> Self {
        let (last_action, status) = i.last_action.as_ref().map_or_else(
            || ("-".to_owned(), "-".to_owned()),
            |a| (a.name.clone(), a.status.clone()),
        );
        Self {
            id: i.id.clone(),
            name: i.name.clone(),
            last_action,
            status,
        }
    }
}

fn instance_detail(i: &Instance) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("ID", i.id.clone()),
        ("Name", i.name.clone()),
        ("Model", i.model_id.clone()),
        ("Description", i.description.clone()),
    ];
    if let Some(action) = &i.last_action {
        pairs.push(("Last action", action.name.clone()));
        pairs.push(("Status", action.status.clone()));
        pairs.push(("Job", util::or_dash(action.execution_id.as_deref())));
    }
    pairs
}

fn render_instances(instances: &[Instance], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        global.format(),
        instances,
        |i| InstanceRow::from(i),
        |i| i.name.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn models(
    platform: &Platform,
    command: ModelsCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let models = platform.models();
    match command {
        ModelsCommand::List => {
            let all = models.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |m| ModelRow::from(m),
                |m| m.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        ModelsCommand::Get { name } => {
            let model = models.get_by_name(&name).await?;
            let out =
                output::render_single(global.format(), &model, model_detail, |m| m.name.clone())?;
            output::print_output(&out, global.quiet);
        }

        ModelsCommand::Delete {
            name,
            delete_instances,
            delete_related,
        } => {
            let prompt = if delete_related {
                format!("Delete model '{name}' and the workflows and transformations it uses?")
            } else {
                format!("Delete model '{name}'?")
            };
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }
            let model = models.get_by_name(&name).await?;
            let options = DeleteOptions {
                delete_instances,
                delete_related,
            };
            models.delete_with_options(&model, options).await?;
            output::status(global, &format!("Model '{name}' deleted"));
        }

        ModelsCommand::Import(args) => {
            let model: Model = util::read_document(&args.file)?;
            let created = models.import(&model).await?;
            output::status(
                global,
                &format!("Model '{}' imported as {}", created.name, created.id),
            );
        }

        ModelsCommand::Export(args) => {
            let found = models.get_by_name(&args.name).await?;
            let exported = models.export(&found.id).await?;
            util::write_document(&exported, args.file.as_deref(), global)?;
        }

        ModelsCommand::Instances { name } => {
            let model = models.get_by_name(&name).await?;
            let instances = models.instances(&model.id).await?;
            render_instances(&instances, global)?;
        }
    }
    Ok(())
}

pub async fn instances(
    platform: &Platform,
    command: InstancesCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service = platform.api().instances();
    match command {
        InstancesCommand::List { model } => {
            let model = platform.models().get_by_name(&model).await?;
            let all = service.get_all(&model.id).await?;
            render_instances(&all, global)?;
        }

        InstancesCommand::Get { model, name } => {
            let model = platform.models().get_by_name(&model).await?;
            let instance = service.get_by_name(&model.id, &name).await?;
            let out = output::render_single(global.format(), &instance, instance_detail, |i| {
                i.name.clone()
            })?;
            output::print_output(&out, global.quiet);
        }

        InstancesCommand::Delete { model, name } => {
            if !util::confirm(&format!("Delete instance '{name}' of '{model}'?"), global.yes)? {
                return Ok(());
            }
            let model = platform.models().get_by_name(&model).await?;
            let instance = service.get_by_name(&model.id, &name).await?;
            service.delete(&model.id, &instance.id).await?;
            output::status(global, &format!("Instance '{name}' deleted"));
        }
    }
    Ok(())
}
