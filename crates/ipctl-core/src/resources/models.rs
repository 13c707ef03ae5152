// Lifecycle Manager models, with the cascade delete.

use ipctl_api::ApiClient;
use ipctl_api::services::{Instance, Model, ModelAction, RunAction};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::helpers::find_by_name;

/// Flags for [`ModelResource::delete_with_options`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOptions {
    /// Let the server remove attached instances along with the model.
    pub delete_instances: bool,
    /// Also delete the workflows and transformations bound to each action.
    pub delete_related: bool,
}

#[derive(Clone, Copy)]
pub struct ModelResource<'a> {
    api: &'a ApiClient,
}

impl<'a> ModelResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Model>, CoreError> {
        Ok(self.api.models().get_all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Model, CoreError> {
        Ok(self.api.models().get(id).await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Model, CoreError> {
        find_by_name(self.get_all().await?, name, |m| m.name.as_str())
    }

    pub async fn instances(&self, id: &str) -> Result<Vec<Instance>, CoreError> {
        Ok(self.api.models().instances(id).await?)
    }

    pub async fn run_action(&self, id: &str, action: &RunAction) -> Result<Value, CoreError> {
        Ok(self.api.models().run_action(id, action).await?)
    }

    pub async fn import(&self, model: &Model) -> Result<Model, CoreError> {
        Ok(self.api.models().import(model).await?)
    }

    pub async fn export(&self, id: &str) -> Result<Model, CoreError> {
        Ok(self.api.models().export(id).await?)
    }

    /// Delete `model`.
    ///
    /// Without `delete_instances` the model must have no instances. With
    /// `delete_related` each action's workflow is deleted first (a missing
    /// workflow is skipped, any other failure aborts), then its pre and post
    /// transformations (failures only warn).
    pub async fn delete_with_options(
        &self,
        model: &Model,
        options: DeleteOptions,
    ) -> Result<(), CoreError> {
        if !options.delete_instances {
            let attached = self.instances(&model.id).await?;
            if !attached.is_empty() {
                return Err(CoreError::AttachedInstances {
                    model: model.name.clone(),
                    count: attached.len(),
                });
            }
        }

        if options.delete_related {
            for action in &model.actions {
                self.delete_action_workflow(action).await?;
                let bound = [action.pre_transformation_id(), action.post_transformation_id()];
                for id in bound.into_iter().flatten() {
                    self.delete_action_transformation(id).await;
                }
            }
        }

        self.api
            .models()
            .delete(&model.id, options.delete_instances)
            .await?;
        info!(model = %model.name, "model deleted");
        Ok(())
    }

    async fn delete_action_workflow(&self, action: &ModelAction) -> Result<(), CoreError> {
        let Some(id) = action.workflow_id() else {
            return Ok(());
        };
        let workflow = match self.api.workflows().get_by_id(id).await {
            Ok(workflow) => workflow,
            Err(e) if e.is_not_found() => {
                debug!(action = %action.name, workflow = id, "bound workflow already gone");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        self.api.workflows().delete(&workflow.name).await?;
        info!(workflow = %workflow.name, "workflow deleted");
        Ok(())
    }

    async fn delete_action_transformation(&self, id: &str) {
        let transformations = self.api.transformations();
        let result = match transformations.get(id).await {
            Ok(found) => transformations.delete(found.id()).await,
            Err(e) if e.is_not_found() => return,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => info!(transformation = id, "transformation deleted"),
            Err(e) => warn!(transformation = id, error = %e, "failed to delete transformation"),
        }
    }
}
