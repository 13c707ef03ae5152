// Name-addressed lookups for assets whose endpoints key on ids.

use ipctl_api::ApiClient;
use ipctl_api::services::{DeviceGroup, Prebuilt, Template};
use serde_json::Value;

use crate::error::CoreError;
use crate::helpers::{delete_all, find_by_name};

/// Automation Studio templates.
#[derive(Clone, Copy)]
pub struct TemplateResource<'a> {
    api: &'a ApiClient,
}

impl<'a> TemplateResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Template>, CoreError> {
        Ok(self.api.templates().get_all().await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Template, CoreError> {
        find_by_name(self.get_all().await?, name, |t| t.name.as_str())
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<(), CoreError> {
        let template = self.get_by_name(name).await?;
        Ok(self.api.templates().delete(template.id()).await?)
    }

    pub async fn import(&self, template: &Template) -> Result<Value, CoreError> {
        Ok(self.api.templates().import(template).await?)
    }

    pub async fn export_by_name(&self, name: &str) -> Result<Template, CoreError> {
        let template = self.get_by_name(name).await?;
        Ok(self.api.templates().export(template.id()).await?)
    }

    pub async fn clear(&self) -> Result<usize, CoreError> {
        let all = self.get_all().await?;
        let api = self.api;
        delete_all(&all, Template::id, |id| async move {
            api.templates().delete(&id).await
        })
        .await?;
        Ok(all.len())
    }
}

/// Prebuilt packages, looked up by their metadata name.
#[derive(Clone, Copy)]
pub struct PrebuiltResource<'a> {
    api: &'a ApiClient,
}

impl<'a> PrebuiltResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Prebuilt>, CoreError> {
        Ok(self.api.prebuilts().get_all().await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Prebuilt, CoreError> {
        find_by_name(self.get_all().await?, name, Prebuilt::name)
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<(), CoreError> {
        let prebuilt = self.get_by_name(name).await?;
        Ok(self.api.prebuilts().delete(prebuilt.id()).await?)
    }

    pub async fn export_by_name(&self, name: &str) -> Result<Prebuilt, CoreError> {
        let prebuilt = self.get_by_name(name).await?;
        Ok(self.api.prebuilts().export(prebuilt.id()).await?)
    }

    pub async fn import(&self, prebuilt: &Prebuilt, overwrite: bool) -> Result<Value, CoreError> {
        Ok(self.api.prebuilts().import(prebuilt, overwrite).await?)
    }
}

/// Configuration Manager device groups.
#[derive(Clone, Copy)]
pub struct DeviceGroupResource<'a> {
    api: &'a ApiClient,
}

impl<'a> DeviceGroupResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<DeviceGroup>, CoreError> {
        Ok(self.api.device_groups().get_all().await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<DeviceGroup, CoreError> {
        find_by_name(self.get_all().await?, name, |g| g.name.as_str())
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        devices: &[String],
    ) -> Result<Value, CoreError> {
        Ok(self
            .api
            .device_groups()
            .create(name, description, devices)
            .await?)
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<(), CoreError> {
        let group = self.get_by_name(name).await?;
        Ok(self.api.device_groups().delete(&group.id).await?)
    }
}
