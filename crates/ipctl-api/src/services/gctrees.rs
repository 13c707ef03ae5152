// Configuration Manager golden configuration trees

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::Operation;

const CONFIGS: &str = "/configuration_manager/configs";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldenConfigTree {
    #[serde(alias = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub versions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A configuration parser known to the configuration manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigParser {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/configuration_manager/configs`
pub struct GoldenConfigs<'a> {
    pub(crate) api: &'a ApiClient,
}

impl GoldenConfigs<'_> {
    pub async fn get_all(&self) -> Result<Vec<GoldenConfigTree>, Error> {
        self.api.list(Operation::get(CONFIGS)).await
    }

    /// The tree summary; the server returns an array with zero or one entry.
    pub async fn get(&self, id: &str) -> Result<GoldenConfigTree, Error> {
        let found: Vec<GoldenConfigTree> = self
            .api
            .list(Operation::get(format!("{CONFIGS}/{}", encode_segment(id))))
            .await
            .map_err(not_found("gctree"))?;
        found.into_iter().next().ok_or(Error::NotFound("gctree"))
    }

    pub async fn get_by_name(&self, name: &str) -> Result<GoldenConfigTree, Error> {
        self.get_all()
            .await?
            .into_iter()
            .find(|t| t.name == name)
            .ok_or(Error::NotFound("gctree"))
    }

    pub async fn create(&self, name: &str, device_type: &str) -> Result<GoldenConfigTree, Error> {
        let op = Operation::post(CONFIGS)
            .json_value(json!({ "name": name, "deviceType": device_type }))
            .expect(200);
        self.api.call(op).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.api
            .delete(&format!("{CONFIGS}/{}", encode_segment(id)))
            .await
            .map_err(not_found("gctree"))
    }

    pub async fn parsers(&self) -> Result<Vec<ConfigParser>, Error> {
        self.api
            .list(Operation::get("/configuration_manager/configurations/parser"))
            .await
    }

    pub async fn import(&self, tree: &Value) -> Result<Value, Error> {
        let op = Operation::post("/configuration_manager/import/goldenconfigs")
            .json(&json!({ "trees": [tree] }))?
            .expect(200);
        self.api.call(op).await
    }

    pub async fn export(&self, id: &str) -> Result<Value, Error> {
        let op = Operation::post("/configuration_manager/export/goldenconfigs")
            .json_value(json!({ "treeId": id }))
            .expect(200);
        self.api.call(op).await.map_err(not_found("gctree"))
    }
}
