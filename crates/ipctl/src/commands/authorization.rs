//! Account, group and role command handlers.

use tabled::Tabled;

use ipctl_core::Platform;
use ipctl_core::services::{Account, Group, Role};

use crate::cli::{AccountsCommand, GlobalOpts, NamedCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Provenance")]
    provenance: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Logged In")]
    logged_in: String,
}

impl From<&Account> for AccountRow {
    fn from(a: &Account) -> Self {
        Self {
            username: a.username.clone(),
            email: util::or_dash(a.email.as_deref()),
            provenance: a.provenance.clone(),
            active: yes_no(!a.inactive),
            logged_in: yes_no(a.logged_in),
        }
    }
}

fn account_detail(a: &Account) -> Vec<(&'static str, String)> {
    vec![
        ("ID", a.id.clone()),
        ("Username", a.username.clone()),
        ("First name", util::or_dash(a.first_name.as_deref())),
        ("Email", util::or_dash(a.email.as_deref())),
        ("Provenance", a.provenance.clone()),
        ("Active", yes_no(!a.inactive)),
        ("Logged in", yes_no(a.logged_in)),
    ]
}

/// Groups and roles share a shape.
#[derive(Tabled)]
struct AuthzRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Provenance")]
    provenance: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Group> for AuthzRow {
    fn from(g: &Group) -> Self {
        Self {
            id: g.id().into(),
            name: g.name.clone(),
            provenance: g.provenance.clone(),
            description: g.description.clone(),
        }
    }
}

impl From<&Role> for AuthzRow {
    fn from(r: &Role) -> Self {
        Self {
            id: r.id().into(),
            name: r.name.clone(),
            provenance: r.provenance.clone(),
            description: r.description.clone(),
        }
    }
}

fn yes_no(b: bool) -> String {
    if b { "yes" } else { "no" }.into()
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn accounts(
    platform: &Platform,
    command: AccountsCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let accounts = platform.accounts();
    match command {
        AccountsCommand::List => {
            let all = accounts.get_all().await?;
            let out = output::render_list(
                global.format(),
                &all,
                |a| AccountRow::from(a),
                |a| a.username.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        AccountsCommand::Get { username } => {
            let account = accounts.get_by_username(&username).await?;
            let out = output::render_single(global.format(), &account, account_detail, |a| {
                a.username.clone()
            })?;
            output::print_output(&out, global.quiet);
        }

        AccountsCommand::Activate { username } => {
            accounts.activate(&username).await?;
            output::status(global, &format!("Account '{username}' activated"));
        }

        AccountsCommand::Deactivate { username } => {
            if !util::confirm(&format!("Deactivate account '{username}'?"), global.yes)? {
                return Ok(());
            }
            accounts.deactivate(&username).await?;
            output::status(global, &format!("Account '{username}' deactivated"));
        }
    }
    Ok(())
}

pub async fn groups(
    platform: &Platform,
    command: NamedCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let groups = platform.groups();
    match command {
        NamedCommand::List => {
            let all = groups.get_all().await?;
            let out = output::render_list(global.format(), &all, |g| AuthzRow::from(g), |g| {
                g.name.clone()
            })?;
            output::print_output(&out, global.quiet);
        }

        NamedCommand::Get { name } => {
            let group = groups.get_by_name(&name).await?;
            let out = output::render_single(
                global.format(),
                &group,
                |g| {
                    vec![
                        ("ID", g.id().to_owned()),
                        ("Name", g.name.clone()),
                        ("Description", g.description.clone()),
                        ("Provenance", g.provenance.clone()),
                        ("Roles", g.assigned_roles.len().to_string()),
                    ]
                },
                |g| g.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        NamedCommand::Delete { name } => {
            if !util::confirm(&format!("Delete group '{name}'?"), global.yes)? {
                return Ok(());
            }
            groups.delete_by_name(&name).await?;
            output::status(global, &format!("Group '{name}' deleted"));
        }
    }
    Ok(())
}

pub async fn roles(
    platform: &Platform,
    command: NamedCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let roles = platform.roles();
    match command {
        NamedCommand::List => {
            let all = roles.get_all().await?;
            let out = output::render_list(global.format(), &all, |r| AuthzRow::from(r), |r| {
                r.name.clone()
            })?;
            output::print_output(&out, global.quiet);
        }

        NamedCommand::Get { name } => {
            let role = roles.get_by_name(&name).await?;
            let out = output::render_single(
                global.format(),
                &role,
                |r| {
                    vec![
                        ("ID", r.id().to_owned()),
                        ("Name", r.name.clone()),
                        ("Description", r.description.clone()),
                        ("Provenance", r.provenance.clone()),
                        ("Methods", r.allowed_methods.len().to_string()),
                        ("Views", r.allowed_views.len().to_string()),
                    ]
                },
                |r| r.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        NamedCommand::Delete { name } => {
            if !util::confirm(&format!("Delete role '{name}'?"), global.yes)? {
                return Ok(());
            }
            roles.delete_by_name(&name).await?;
            output::status(global, &format!("Role '{name}' deleted"));
        }
    }
    Ok(())
}
