use ipctl_api::ApiClient;
use ipctl_api::services::Workflow;
use serde_json::Value;

use crate::error::CoreError;
use crate::helpers::delete_all;

/// Automation Studio workflows. Most endpoints key on the name.
#[derive(Clone, Copy)]
pub struct WorkflowResource<'a> {
    api: &'a ApiClient,
}

impl<'a> WorkflowResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Workflow>, CoreError> {
        Ok(self.api.workflows().get_all().await?)
    }

    pub async fn get(&self, name: &str) -> Result<Workflow, CoreError> {
        Ok(self.api.workflows().get(name).await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Workflow, CoreError> {
        Ok(self.api.workflows().get_by_id(id).await?)
    }

    pub async fn create(&self, workflow: &Workflow) -> Result<Workflow, CoreError> {
        Ok(self.api.workflows().create(workflow).await?)
    }

    pub async fn delete(&self, name: &str) -> Result<(), CoreError> {
        Ok(self.api.workflows().delete(name).await?)
    }

    pub async fn import(&self, workflow: &Workflow) -> Result<Value, CoreError> {
        Ok(self.api.workflows().import(workflow).await?)
    }

    pub async fn export(&self, name: &str) -> Result<Workflow, CoreError> {
        Ok(self.api.workflows().export(name).await?)
    }

    /// Delete every workflow, one call per name.
    pub async fn clear(&self) -> Result<usize, CoreError> {
        let all = self.get_all().await?;
        let api = self.api;
        delete_all(&all, |w| w.name.as_str(), |name| async move {
            api.workflows().delete(&name).await
        })
        .await?;
        Ok(all.len())
    }
}
