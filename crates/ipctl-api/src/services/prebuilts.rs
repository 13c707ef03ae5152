// Prebuilt bundles

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const PREBUILTS: &str = "/prebuilts";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrebuiltMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prebuilt {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: PrebuiltMetadata,
    #[serde(default)]
    pub manifest: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bundles: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Prebuilt {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// `/prebuilts`
pub struct Prebuilts<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Prebuilts<'_> {
    fn item(id: &str) -> String {
        format!("{PREBUILTS}/{}", encode_segment(id))
    }

    pub async fn get_all(&self) -> Result<Vec<Prebuilt>, Error> {
        self.api.paginate(PREBUILTS, &QueryParams::new()).await
    }

    pub async fn get(&self, id: &str) -> Result<Prebuilt, Error> {
        self.api.get_one(&Self::item(id), "prebuilt").await
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.api
            .delete(&Self::item(id))
            .await
            .map_err(not_found("prebuilt"))
    }

    pub async fn export(&self, id: &str) -> Result<Prebuilt, Error> {
        self.api
            .get_one(&format!("{}/export", Self::item(id)), "prebuilt")
            .await
    }

    pub async fn import(&self, prebuilt: &Prebuilt, overwrite: bool) -> Result<Value, Error> {
        let op = Operation::post(format!("{PREBUILTS}/import"))
            .json(&json!({ "prebuilt": prebuilt, "overwrite": overwrite }))?
            .expect(200);
        self.api.call(op).await
    }
}
