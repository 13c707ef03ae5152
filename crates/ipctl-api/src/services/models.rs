// Lifecycle Manager resource models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::instances::Instance;
use crate::api::{ApiClient, Wrapped, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

pub(crate) const RESOURCES: &str = "/lifecycle-manager/resources";

/// An action declared on a model, optionally bound to a workflow and
/// pre/post transformations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelAction {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_workflow_jst: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_workflow_jst: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelAction {
    /// Bound workflow id, if set and non-empty.
    pub fn workflow_id(&self) -> Option<&str> {
        self.workflow.as_deref().filter(|s| !s.is_empty())
    }

    pub fn pre_transformation_id(&self) -> Option<&str> {
        self.pre_workflow_jst.as_deref().filter(|s| !s.is_empty())
    }

    pub fn post_transformation_id(&self) -> Option<&str> {
        self.post_workflow_jst.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub schema: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<ModelAction>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST …/run-action`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAction {
    pub action_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub inputs: Value,
}

/// `/lifecycle-manager/resources`
pub struct Models<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Models<'_> {
    fn item(id: &str) -> String {
        format!("{RESOURCES}/{}", encode_segment(id))
    }

    pub async fn get_all(&self) -> Result<Vec<Model>, Error> {
        self.api.paginate(RESOURCES, &QueryParams::new()).await
    }

    pub async fn get(&self, id: &str) -> Result<Model, Error> {
        self.api.get_one(&Self::item(id), "model").await
    }

    pub async fn create(&self, model: &Model) -> Result<Model, Error> {
        let op = Operation::post(RESOURCES).json(model)?.expect(200);
        self.api
            .call::<Wrapped<Model>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    /// Delete a model. With `delete_instances` the server also removes
    /// every instance attached to it.
    pub async fn delete(&self, id: &str, delete_instances: bool) -> Result<(), Error> {
        let mut op = Operation::delete(Self::item(id));
        if delete_instances {
            op = op.json_value(json!({
                "queryParameters": { "delete-associated-instances": "true" }
            }));
        }
        self.api.call_unit(op).await.map_err(not_found("model"))
    }

    /// Instances attached to model `id`.
    pub async fn instances(&self, id: &str) -> Result<Vec<Instance>, Error> {
        self.api
            .paginate(&format!("{}/instances", Self::item(id)), &QueryParams::new())
            .await
    }

    pub async fn run_action(&self, id: &str, action: &RunAction) -> Result<Value, Error> {
        let op = Operation::post(format!("{}/run-action", Self::item(id)))
            .json(action)?
            .expect(200);
        self.api.call(op).await
    }

    pub async fn import(&self, model: &Model) -> Result<Model, Error> {
        let op = Operation::post(format!("{RESOURCES}/import"))
            .json(&json!({ "model": model }))?
            .expect(200);
        self.api
            .call::<Wrapped<Model>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn export(&self, id: &str) -> Result<Model, Error> {
        self.api
            .get_one(&format!("{}/export", Self::item(id)), "model")
            .await
    }
}
