// MOP command templates

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::Operation;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandTemplate {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub os: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pass_rule: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ignore_warnings: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commands: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/mop/*` command template routes.
pub struct CommandTemplates<'a> {
    pub(crate) api: &'a ApiClient,
}

impl CommandTemplates<'_> {
    pub async fn get_all(&self) -> Result<Vec<CommandTemplate>, Error> {
        self.api.list(Operation::get("/mop/listTemplates")).await
    }

    /// The server answers with an array holding zero or one template.
    pub async fn get(&self, name: &str) -> Result<CommandTemplate, Error> {
        let path = format!("/mop/listATemplate/{}", encode_segment(name));
        let found: Vec<CommandTemplate> = self
            .api
            .list(Operation::get(path))
            .await
            .map_err(not_found("command template"))?;
        found
            .into_iter()
            .next()
            .ok_or(Error::NotFound("command template"))
    }

    pub async fn create(&self, template: &CommandTemplate) -> Result<Value, Error> {
        let op = Operation::post("/mop/createTemplate")
            .json(&json!({ "mop": template }))?
            .expect(200);
        self.api.call(op).await
    }

    pub async fn delete(&self, name: &str) -> Result<(), Error> {
        let path = format!("/mop/deleteTemplate/{}", encode_segment(name));
        self.api
            .delete(&path)
            .await
            .map_err(not_found("command template"))
    }

    pub async fn import(&self, template: &CommandTemplate) -> Result<Value, Error> {
        let op = Operation::post("/mop/import")
            .json(&json!({ "type": "templates", "data": [template] }))?
            .expect(200);
        self.api.call(op).await
    }

    pub async fn export(&self, name: &str) -> Result<CommandTemplate, Error> {
        let op = Operation::post("/mop/export")
            .json_value(json!({ "options": { "name": name, "type": "templates" } }))
            .expect(200);
        self.api.call(op).await.map_err(not_found("command template"))
    }
}
