//! Configuration Manager and MOP command handlers: device groups, devices,
//! golden configuration trees, command and analytic templates.

use serde_json::Value;
use tabled::Tabled;

use ipctl_core::Platform;
use ipctl_core::services::{AnalyticTemplate, CommandTemplate, Device, DeviceGroup};

use crate::cli::{AssetCommand, DeviceGroupsCommand, DevicesCommand, GlobalOpts, NamedCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Device groups ───────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceGroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Devices")]
    devices: usize,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&DeviceGroup> for DeviceGroupRow {
    fn from(g: &DeviceGroup) -> Self {
        Self {
            id: g.id.clone(),
            name: g.name.clone(),
            devices: g.devices.len(),
            description: g.description.clone(),
        }
    }
}

fn device_group_detail(g: &DeviceGroup) -> Vec<(&'static str, String)> {
    vec![
        ("ID", g.id.clone()),
        ("Name", g.name.clone()),
        ("Description", g.description.clone()),
        ("Devices", g.devices.join(", ")),
    ]
}

pub async fn device_groups(
    platform: &Platform,
    command: DeviceGroupsCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let groups = platform.device_groups();
    match command {
        DeviceGroupsCommand::Named(NamedCommand::List) => {
            let all = groups.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |g| DeviceGroupRow::from(g),
                |g| g.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        DeviceGroupsCommand::Named(NamedCommand::Get { name }) => {
            let group = groups.get_by_name(&name).await?;
            let out = output::render_single(global.format(), &group, device_group_detail, |g| {
                g.name.clone()
            })?;
            output::print_output(&out, global.quiet);
        }

        DeviceGroupsCommand::Named(NamedCommand::Delete { name }) => {
            if !util::confirm(&format!("Delete device group '{name}'?"), global.yes)? {
                return Ok(());
            }
            groups.delete_by_name(&name).await?;
            output::status(global, &format!("Device group '{name}' deleted"));
        }

        DeviceGroupsCommand::Create {
            name,
            description,
            devices,
        } => {
            groups.create(&name, &description, &devices).await?;
            output::status(
                global,
                &format!("Device group '{name}' created with {} devices", devices.len()),
            );
        }
    }
    Ok(())
}

// ── Devices ─────────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "OS")]
    ostype: String,
    #[tabled(rename = "Type")]
    device_type: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            name: d.name.clone(),
            host: d.host.clone(),
            ostype: d.ostype.clone(),
            device_type: d.device_type.clone(),
        }
    }
}

fn device_detail(d: &Device) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("Name", d.name.clone()),
        ("Host", d.host.clone()),
        ("OS", d.ostype.clone()),
        ("Type", d.device_type.clone()),
        ("Origins", d.origins.join(", ")),
        ("Actions", d.actions.join(", ")),
    ];
    // Vendor-specific properties vary per adapter; show the scalar ones.
    for (key, value) in &d.properties {
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        pairs.push(("", format!("{key}: {rendered}")));
    }
    pairs
}

pub async fn devices(
    platform: &Platform,
    command: DevicesCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let devices = platform.api().devices();
    match command {
        DevicesCommand::List => {
            let all = devices.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |d| DeviceRow::from(d),
                |d| d.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        DevicesCommand::Get { name } => {
            let device = devices.get(&name).await?;
            let out =
                output::render_single(global.format(), &device, device_detail, |d| d.name.clone())?;
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}

// ── Golden configuration ────────────────────────────────────────────

#[derive(Tabled)]
struct TreeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Device Type")]
    device_type: String,
    #[tabled(rename = "Versions")]
    versions: String,
}

pub async fn golden_config(
    platform: &Platform,
    command: AssetCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let trees = platform.api().golden_configs();
    match command {
        AssetCommand::Named(NamedCommand::List) => {
            let all = trees.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |t| TreeRow {
                    id: t.id.clone(),
                    name: t.name.clone(),
                    device_type: t.device_type.clone(),
                    versions: t.versions.join(", "),
                },
                |t| t.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        AssetCommand::Named(NamedCommand::Get { name }) => {
            let tree = trees.get_by_name(&name).await?;
            let out = output::render_single(
                global.format(),
                &tree,
                |t| {
                    vec![
                        ("ID", t.id.clone()),
                        ("Name", t.name.clone()),
                        ("Device type", t.device_type.clone()),
                        ("Versions", t.versions.join(", ")),
                    ]
                },
                |t| t.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        AssetCommand::Named(NamedCommand::Delete { name }) => {
            if !util::confirm(&format!("Delete golden config '{name}'?"), global.yes)? {
                return Ok(());
            }
            let tree = trees.get_by_name(&name).await?;
            trees.delete(&tree.id).await?;
            output::status(global, &format!("Golden config '{name}' deleted"));
        }

        AssetCommand::Import(args) => {
            let document: Value = util::read_document(&args.file)?;
            trees.import(&document).await?;
            output::status(
                global,
                &format!("Golden config imported from {}", args.file.display()),
            );
        }

        AssetCommand::Export(args) => {
            let tree = trees.get_by_name(&args.name).await?;
            let document = trees.export(&tree.id).await?;
            util::write_document(&document, args.file.as_deref(), global)?;
        }
    }
    Ok(())
}

// ── MOP templates ───────────────────────────────────────────────────

#[derive(Tabled)]
struct MopRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "OS")]
    os: String,
    #[tabled(rename = "Pass Rule")]
    pass_rule: &'static str,
}

fn pass_rule(all: bool) -> &'static str {
    if all { "all" } else { "one" }
}

pub async fn command_templates(
    platform: &Platform,
    command: AssetCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let templates = platform.api().command_templates();
    match command {
        AssetCommand::Named(NamedCommand::List) => {
            let all = templates.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |t| MopRow {
                    name: t.name.clone(),
                    os: t.os.clone(),
                    pass_rule: pass_rule(t.pass_rule),
                },
                |t| t.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        AssetCommand::Named(NamedCommand::Get { name }) => {
            let template = templates.get(&name).await?;
            let out = output::render_single(
                global.format(),
                &template,
                |t: &CommandTemplate| {
                    vec![
                        ("Name", t.name.clone()),
                        ("OS", t.os.clone()),
                        ("Pass rule", pass_rule(t.pass_rule).to_owned()),
                        ("Ignore warnings", t.ignore_warnings.to_string()),
                        ("Commands", t.commands.len().to_string()),
                    ]
                },
                |t| t.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        AssetCommand::Named(NamedCommand::Delete { name }) => {
            if !util::confirm(&format!("Delete command template '{name}'?"), global.yes)? {
                return Ok(());
            }
            templates.delete(&name).await?;
            output::status(global, &format!("Command template '{name}' deleted"));
        }

        AssetCommand::Import(args) => {
            let template: CommandTemplate = util::read_document(&args.file)?;
            templates.import(&template).await?;
            output::status(global, &format!("Command template '{}' imported", template.name));
        }

        AssetCommand::Export(args) => {
            let template = templates.export(&args.name).await?;
            util::write_document(&template, args.file.as_deref(), global)?;
        }
    }
    Ok(())
}

pub async fn analytic_templates(
    platform: &Platform,
    command: AssetCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let templates = platform.api().analytic_templates();
    match command {
        AssetCommand::Named(NamedCommand::List) => {
            let all = templates.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |t| MopRow {
                    name: t.name.clone(),
                    os: t.os.clone(),
                    pass_rule: pass_rule(t.pass_rule),
                },
                |t| t.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        AssetCommand::Named(NamedCommand::Get { name }) => {
            let template = templates.get(&name).await?;
            let out = output::render_single(
                global.format(),
                &template,
                |t: &AnalyticTemplate| {
                    vec![
                        ("ID", t.id().to_owned()),
                        ("Name", t.name.clone()),
                        ("OS", t.os.clone()),
                        ("Pass rule", pass_rule(t.pass_rule).to_owned()),
                        ("Command pairs", t.pre_post_commands.len().to_string()),
                    ]
                },
                |t| t.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        AssetCommand::Named(NamedCommand::Delete { name }) => {
            if !util::confirm(&format!("Delete analytic template '{name}'?"), global.yes)? {
                return Ok(());
            }
            let template = templates.get(&name).await?;
            templates.delete(template.id()).await?;
            output::status(global, &format!("Analytic template '{name}' deleted"));
        }

        AssetCommand::Import(args) => {
            let template: AnalyticTemplate = util::read_document(&args.file)?;
            templates.import(&template).await?;
            output::status(global, &format!("Analytic template '{}' imported", template.name));
        }

        AssetCommand::Export(args) => {
            let template = templates.get(&args.name).await?;
            util::write_document(&template, args.file.as_deref(), global)?;
        }
    }
    Ok(())
}
