// Automation Studio templates (TextFSM / Jinja2)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, Wrapped, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const TEMPLATES: &str = "/automation-studio/templates";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub command: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub template: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: String,
    /// `textfsm` or `jinja2`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Template {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// `/automation-studio/templates`
pub struct Templates<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Templates<'_> {
    fn item(id: &str) -> String {
        format!("{TEMPLATES}/{}", encode_segment(id))
    }

    pub async fn get_all(&self) -> Result<Vec<Template>, Error> {
        self.api.paginate(TEMPLATES, &QueryParams::new()).await
    }

    pub async fn get(&self, id: &str) -> Result<Template, Error> {
        self.api.get_one(&Self::item(id), "template").await
    }

    pub async fn create(&self, template: &Template) -> Result<Template, Error> {
        let op = Operation::post(TEMPLATES)
            .json(&json!({ "template": template }))?
            .expect(200);
        self.api
            .call::<Wrapped<Template>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.api
            .delete(&Self::item(id))
            .await
            .map_err(not_found("template"))
    }

    pub async fn import(&self, template: &Template) -> Result<Value, Error> {
        let op = Operation::post(format!("{TEMPLATES}/import"))
            .json(&json!({ "templates": [template] }))?
            .expect(200);
        self.api.call(op).await
    }

    pub async fn export(&self, id: &str) -> Result<Template, Error> {
        self.api
            .get_one(&format!("{}/export", Self::item(id)), "template")
            .await
    }
}
