// Integration models (OpenAPI documents the platform generates adapters from)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const MODELS: &str = "/integration-models";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationModel {
    /// `<title>:<version>`, used as the path key.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/integration-models`
pub struct IntegrationModels<'a> {
    pub(crate) api: &'a ApiClient,
}

impl IntegrationModels<'_> {
    fn item(name: &str) -> String {
        format!("{MODELS}/{}", encode_segment(name))
    }

    pub async fn get_all(&self) -> Result<Vec<IntegrationModel>, Error> {
        self.api.paginate(MODELS, &QueryParams::new()).await
    }

    pub async fn get(&self, name: &str) -> Result<IntegrationModel, Error> {
        self.api.get_one(&Self::item(name), "integration model").await
    }

    /// Upload a raw OpenAPI document.
    pub async fn create(&self, model: &Value) -> Result<Value, Error> {
        let op = Operation::post(MODELS)
            .json(&json!({ "model": model }))?
            .expect(200);
        self.api.call(op).await
    }

    pub async fn delete(&self, name: &str) -> Result<(), Error> {
        self.api
            .delete(&Self::item(name))
            .await
            .map_err(not_found("integration model"))
    }

    /// The OpenAPI document behind the model.
    pub async fn export(&self, name: &str) -> Result<Value, Error> {
        self.api
            .get(&format!("{}/export", Self::item(name)))
            .await
            .map_err(not_found("integration model"))
    }
}
