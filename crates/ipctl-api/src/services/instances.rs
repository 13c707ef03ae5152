// Lifecycle Manager instances

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::models::RESOURCES;
use crate::api::{ApiClient, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::QueryParams;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastAction {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub instance_data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action: Option<LastAction>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/lifecycle-manager/resources/{model}/instances`
pub struct Instances<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Instances<'_> {
    fn collection(model_id: &str) -> String {
        format!("{RESOURCES}/{}/instances", encode_segment(model_id))
    }

    pub async fn get_all(&self, model_id: &str) -> Result<Vec<Instance>, Error> {
        self.api
            .paginate(&Self::collection(model_id), &QueryParams::new())
            .await
    }

    pub async fn get(&self, model_id: &str, id: &str) -> Result<Instance, Error> {
        let path = format!("{}/{}", Self::collection(model_id), encode_segment(id));
        self.api.get_one(&path, "instance").await
    }

    pub async fn get_by_name(&self, model_id: &str, name: &str) -> Result<Instance, Error> {
        let found: Vec<Instance> = self
            .api
            .paginate(&Self::collection(model_id), &QueryParams::equals("name", name))
            .await?;
        found
            .into_iter()
            .find(|i| i.name == name)
            .ok_or(Error::NotFound("instance"))
    }

    pub async fn delete(&self, model_id: &str, id: &str) -> Result<(), Error> {
        let path = format!("{}/{}", Self::collection(model_id), encode_segment(id));
        self.api.delete(&path).await.map_err(not_found("instance"))
    }
}
