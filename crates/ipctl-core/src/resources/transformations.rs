use ipctl_api::ApiClient;
use ipctl_api::services::Transformation;

use crate::error::CoreError;
use crate::helpers::delete_all;

/// JST transformations.
#[derive(Clone, Copy)]
pub struct TransformationResource<'a> {
    api: &'a ApiClient,
}

impl<'a> TransformationResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Transformation>, CoreError> {
        Ok(self.api.transformations().get_all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Transformation, CoreError> {
        Ok(self.api.transformations().get(id).await?)
    }

    /// Names starting with `@` are reserved for the platform and never match.
    pub async fn get_by_name(&self, name: &str) -> Result<Transformation, CoreError> {
        Ok(self.api.transformations().get_by_name(name).await?)
    }

    pub async fn create(&self, transformation: &Transformation) -> Result<Transformation, CoreError> {
        Ok(self.api.transformations().create(transformation).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.api.transformations().delete(id).await?)
    }

    pub async fn import(&self, transformation: &Transformation) -> Result<Transformation, CoreError> {
        Ok(self.api.transformations().import(transformation).await?)
    }

    /// Delete every transformation the platform lists, one call per id.
    pub async fn clear(&self) -> Result<usize, CoreError> {
        let all = self.get_all().await?;
        let api = self.api;
        delete_all(&all, Transformation::id, |id| async move {
            api.transformations().delete(&id).await
        })
        .await?;
        Ok(all.len())
    }
}
