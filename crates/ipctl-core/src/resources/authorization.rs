// Accounts, groups, and roles addressed by name.

use ipctl_api::ApiClient;
use ipctl_api::services::{Account, Group, Role};

use crate::error::CoreError;
use crate::helpers::find_by_name;

#[derive(Clone, Copy)]
pub struct AccountResource<'a> {
    api: &'a ApiClient,
}

impl<'a> AccountResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Account>, CoreError> {
        Ok(self.api.accounts().get_all().await?)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Account, CoreError> {
        Ok(self.api.accounts().get_by_username(username).await?)
    }

    /// Reactivate the account named `username`. Returns the account as it was.
    pub async fn activate(&self, username: &str) -> Result<Account, CoreError> {
        let account = self.get_by_username(username).await?;
        self.api.accounts().activate(&account.id).await?;
        Ok(account)
    }

    pub async fn deactivate(&self, username: &str) -> Result<Account, CoreError> {
        let account = self.get_by_username(username).await?;
        self.api.accounts().deactivate(&account.id).await?;
        Ok(account)
    }
}

#[derive(Clone, Copy)]
pub struct GroupResource<'a> {
    api: &'a ApiClient,
}

impl<'a> GroupResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Group>, CoreError> {
        Ok(self.api.groups().get_all().await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Group, CoreError> {
        find_by_name(self.get_all().await?, name, |g| g.name.as_str())
    }

    pub async fn create(&self, group: &Group) -> Result<Group, CoreError> {
        Ok(self.api.groups().create(group).await?)
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<(), CoreError> {
        let group = self.get_by_name(name).await?;
        Ok(self.api.groups().delete(group.id()).await?)
    }
}

#[derive(Clone, Copy)]
pub struct RoleResource<'a> {
    api: &'a ApiClient,
}

impl<'a> RoleResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Role>, CoreError> {
        Ok(self.api.roles().get_all().await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Role, CoreError> {
        find_by_name(self.get_all().await?, name, |r| r.name.as_str())
    }

    pub async fn create(&self, role: &Role) -> Result<Role, CoreError> {
        Ok(self.api.roles().create(role).await?)
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<(), CoreError> {
        let role = self.get_by_name(name).await?;
        Ok(self.api.roles().delete(role.id()).await?)
    }
}
