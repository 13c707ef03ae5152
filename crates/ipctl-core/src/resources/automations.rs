use ipctl_api::ApiClient;
use ipctl_api::services::Automation;
use serde_json::Value;
use tracing::debug;

use crate::error::CoreError;
use crate::helpers::{delete_all, find_by_name, validate_gbac_rules};

/// Operations Manager automations.
#[derive(Clone, Copy)]
pub struct AutomationResource<'a> {
    api: &'a ApiClient,
}

impl<'a> AutomationResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Automation>, CoreError> {
        Ok(self.api.automations().get_all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Automation, CoreError> {
        Ok(self.api.automations().get(id).await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Automation, CoreError> {
        find_by_name(self.get_all().await?, name, |a| a.name.as_str())
    }

    pub async fn create(&self, automation: &Automation) -> Result<Automation, CoreError> {
        validate_gbac_rules(&automation.gbac.read, &automation.gbac.write)?;
        Ok(self.api.automations().create(automation).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.api.automations().delete(id).await?)
    }

    /// Import one automation.
    ///
    /// The GBAC lists are checked before anything is sent. An automation
    /// without triggers goes out with an explicit `"triggers": []`.
    pub async fn import(&self, automation: &Automation) -> Result<Value, CoreError> {
        validate_gbac_rules(&automation.gbac.read, &automation.gbac.write)?;

        if automation.triggers.is_empty() {
            let mut document = serde_json::to_value(automation)?;
            if let Some(object) = document.as_object_mut() {
                object.insert("triggers".into(), Value::Array(Vec::new()));
            }
            debug!(name = %automation.name, "importing automation without triggers");
            return Ok(self.api.automations().import_transformed(document).await?);
        }

        Ok(self.api.automations().import(automation).await?)
    }

    /// Export with each trigger decoded into its concrete variant.
    pub async fn export(&self, id: &str) -> Result<Automation, CoreError> {
        Ok(self.api.automations().export(id).await?)
    }

    /// Delete every automation. Returns how many were removed.
    pub async fn clear(&self) -> Result<usize, CoreError> {
        let all = self.get_all().await?;
        let api = self.api;
        delete_all(&all, Automation::id, |id| async move {
            api.automations().delete(&id).await
        })
        .await?;
        Ok(all.len())
    }
}
