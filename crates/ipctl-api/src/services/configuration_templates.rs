// Configuration Manager templates and Jinja2 rendering

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const TEMPLATES: &str = "/configuration_manager/templates";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationTemplate {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub template: String,
    #[serde(default)]
    pub variables: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigurationTemplate {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// `/configuration_manager/templates`
pub struct ConfigurationTemplates<'a> {
    pub(crate) api: &'a ApiClient,
}

impl ConfigurationTemplates<'_> {
    pub async fn get_all(&self) -> Result<Vec<ConfigurationTemplate>, Error> {
        self.search(&QueryParams::new()).await
    }

    /// `POST …/templates/search` with the structured filter in the body.
    pub async fn search(&self, query: &QueryParams) -> Result<Vec<ConfigurationTemplate>, Error> {
        let filter: Map<String, Value> = query
            .to_pairs()
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        let op = Operation::post(format!("{TEMPLATES}/search"))
            .json_value(json!({ "options": filter }))
            .expect(200);
        self.api.list(op).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<ConfigurationTemplate, Error> {
        self.search(&QueryParams::equals("name", name))
            .await?
            .into_iter()
            .find(|t| t.name == name)
            .ok_or(Error::NotFound("configuration template"))
    }

    pub async fn create(&self, template: &ConfigurationTemplate) -> Result<Value, Error> {
        let op = Operation::post(TEMPLATES).json(template)?.expect(200);
        self.api.call(op).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.api
            .delete(&format!("{TEMPLATES}/{}", encode_segment(id)))
            .await
            .map_err(not_found("configuration template"))
    }

    /// Render a Jinja2 template server-side.
    pub async fn render_jinja2(&self, template: &str, variables: &Value) -> Result<Value, Error> {
        let op = Operation::post("/configuration_manager/jinja2")
            .json_value(json!({ "template": template, "variables": variables }))
            .expect(200);
        self.api.call(op).await
    }
}
