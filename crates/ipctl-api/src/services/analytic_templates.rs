// MOP analytic templates (pre/post command comparisons)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::Operation;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticTemplate {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub os: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pass_rule: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pre_post_commands: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalyticTemplate {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// `/mop/*` analytic template routes.
pub struct AnalyticTemplates<'a> {
    pub(crate) api: &'a ApiClient,
}

impl AnalyticTemplates<'_> {
    pub async fn get_all(&self) -> Result<Vec<AnalyticTemplate>, Error> {
        self.api
            .list(Operation::get("/mop/listAnalyticTemplates"))
            .await
    }

    pub async fn get(&self, name: &str) -> Result<AnalyticTemplate, Error> {
        let path = format!("/mop/listAnAnalyticTemplate/{}", encode_segment(name));
        let found: Vec<AnalyticTemplate> = self
            .api
            .list(Operation::get(path))
            .await
            .map_err(not_found("analytic template"))?;
        found
            .into_iter()
            .next()
            .ok_or(Error::NotFound("analytic template"))
    }

    pub async fn create(&self, template: &AnalyticTemplate) -> Result<Value, Error> {
        let op = Operation::post("/mop/createAnalyticTemplate")
            .json(&json!({ "template": template }))?
            .expect(200);
        self.api.call(op).await
    }

    /// Analytic templates are deleted by id, unlike command templates.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let path = format!("/mop/deleteAnalyticTemplate/{}", encode_segment(id));
        self.api
            .delete(&path)
            .await
            .map_err(not_found("analytic template"))
    }

    pub async fn import(&self, template: &AnalyticTemplate) -> Result<Value, Error> {
        let op = Operation::post("/mop/import")
            .json(&json!({ "type": "analytics", "data": [template] }))?
            .expect(200);
        self.api.call(op).await
    }
}
