use ipctl_api::ApiClient;
use ipctl_api::services::JsonForm;
use serde_json::Value;

use crate::error::CoreError;
use crate::helpers::find_by_name;

/// JSON forms. Deletion is always a single bulk call.
#[derive(Clone, Copy)]
pub struct JsonFormResource<'a> {
    api: &'a ApiClient,
}

impl<'a> JsonFormResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<JsonForm>, CoreError> {
        Ok(self.api.json_forms().get_all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<JsonForm, CoreError> {
        Ok(self.api.json_forms().get(id).await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<JsonForm, CoreError> {
        find_by_name(self.get_all().await?, name, |f| f.name.as_str())
    }

    pub async fn create(&self, form: &JsonForm) -> Result<JsonForm, CoreError> {
        Ok(self.api.json_forms().create(form).await?)
    }

    pub async fn delete(&self, ids: &[&str]) -> Result<(), CoreError> {
        Ok(self.api.json_forms().delete(ids).await?)
    }

    pub async fn import(&self, form: &JsonForm) -> Result<Value, CoreError> {
        Ok(self.api.json_forms().import(form).await?)
    }

    /// Delete every form in one request. Nothing is sent when there are none.
    pub async fn clear(&self) -> Result<usize, CoreError> {
        let all = self.get_all().await?;
        if all.is_empty() {
            return Ok(0);
        }
        let ids: Vec<&str> = all.iter().map(JsonForm::id).collect();
        self.delete(&ids).await?;
        Ok(all.len())
    }
}
