// Integrations (instances of an integration model)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, Wrapped, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const INTEGRATIONS: &str = "/integrations";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Integration {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/integrations`
pub struct Integrations<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Integrations<'_> {
    fn item(name: &str) -> String {
        format!("{INTEGRATIONS}/{}", encode_segment(name))
    }

    pub async fn get_all(&self) -> Result<Vec<Integration>, Error> {
        self.api.paginate(INTEGRATIONS, &QueryParams::new()).await
    }

    pub async fn get(&self, name: &str) -> Result<Integration, Error> {
        self.api.get_one(&Self::item(name), "integration").await
    }

    pub async fn create(&self, integration: &Integration) -> Result<Integration, Error> {
        let op = Operation::post(INTEGRATIONS)
            .json(&json!({ "properties": integration }))?
            .expect(200);
        self.api
            .call::<Wrapped<Integration>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn delete(&self, name: &str) -> Result<(), Error> {
        self.api
            .delete(&Self::item(name))
            .await
            .map_err(not_found("integration"))
    }
}
