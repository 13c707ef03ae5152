// Automation Studio workflows
//
// Workflows are addressed by name on most endpoints. Lookup, create and
// import live under `/automation-studio`, while delete and export still go
// through the older `/workflow_builder` routes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, Page, Wrapped, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const WORKFLOWS: &str = "/automation-studio/workflows";
const AUTOMATIONS: &str = "/automation-studio/automations";
const BUILDER: &str = "/workflow_builder";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_version: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<Value>,
    #[serde(default)]
    pub input_schema: Value,
    #[serde(default)]
    pub output_schema: Value,
    /// Keyed by task name; order is preserved.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: IndexMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transitions: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Workflow {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// `/automation-studio/workflows` and friends.
pub struct Workflows<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Workflows<'_> {
    pub async fn get_all(&self) -> Result<Vec<Workflow>, Error> {
        self.api.paginate(WORKFLOWS, &QueryParams::new()).await
    }

    /// Exactly one workflow named `name`.
    pub async fn get(&self, name: &str) -> Result<Workflow, Error> {
        self.find_one(QueryParams::equals("name", name)).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Workflow, Error> {
        self.find_one(QueryParams::equals("_id", id)).await
    }

    async fn find_one(&self, query: QueryParams) -> Result<Workflow, Error> {
        let page: Page<Workflow> = self
            .api
            .call(Operation::get(WORKFLOWS).params(&query))
            .await?;
        let mut items = page.data;
        match items.len() {
            0 => Err(Error::NotFound("workflow")),
            1 => Ok(items.remove(0)),
            _ => Err(Error::Validation("unable to find workflow".into())),
        }
    }

    pub async fn create(&self, workflow: &Workflow) -> Result<Workflow, Error> {
        let op = Operation::post(AUTOMATIONS)
            .json(&json!({ "automation": workflow }))?
            .expect(200);
        self.api
            .call::<Wrapped<Workflow>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn update(&self, workflow: &Workflow) -> Result<Workflow, Error> {
        let path = format!("{AUTOMATIONS}/{}", encode_segment(workflow.id()));
        let op = Operation::put(path).json(&json!({ "update": workflow }))?;
        self.api
            .call::<Wrapped<Workflow>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn delete(&self, name: &str) -> Result<(), Error> {
        self.api
            .delete(&format!(
                "{BUILDER}/workflows/delete/{}",
                encode_segment(name)
            ))
            .await
            .map_err(not_found("workflow"))
    }

    pub async fn import(&self, workflow: &Workflow) -> Result<Value, Error> {
        let op = Operation::post(format!("{AUTOMATIONS}/import"))
            .json(&json!({ "automations": [workflow] }))?
            .expect(200);
        self.api.call(op).await
    }

    /// Export by name. Uses the POST form; the GET export route is unreliable.
    pub async fn export(&self, name: &str) -> Result<Workflow, Error> {
        self.export_with(json!({ "name": name })).await
    }

    pub async fn export_by_id(&self, id: &str) -> Result<Workflow, Error> {
        self.export_with(json!({ "_id": id })).await
    }

    async fn export_with(&self, options: Value) -> Result<Workflow, Error> {
        let op = Operation::post(format!("{BUILDER}/export"))
            .json_value(json!({ "options": options }))
            .expect(200);
        self.api
            .call::<Wrapped<Workflow>>(op)
            .await
            .map(Wrapped::into_inner)
            .map_err(not_found("workflow"))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_keep_document_order() {
        let wf: Workflow = serde_json::from_value(json!({
            "name": "wf",
            "type": "automation",
            "tasks": {"workflow_start": {}, "b2c3": {}, "a1b2": {}, "workflow_end": {}},
            "transitions": {},
        }))
        .unwrap();
        let keys: Vec<_> = wf.tasks.keys().map(String::as_str).collect();
        assert_eq!(keys, ["workflow_start", "b2c3", "a1b2", "workflow_end"]);
        assert_eq!(wf.kind, "automation");
    }
}
