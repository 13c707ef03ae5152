// Operations Manager automations

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::triggers::Trigger;
use crate::api::{ApiClient, Wrapped, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const AUTOMATIONS: &str = "/operations-manager/automations";

/// Group-based access control lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gbac {
    #[serde(default, deserialize_with = "null_as_default")]
    pub read: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub write: Vec<Value>,
}

/// An automation binding a component to its triggers.
///
/// `triggers` is always serialized, so an empty list goes out as `[]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Automation {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gbac: Gbac,
    #[serde(default, deserialize_with = "null_as_default")]
    pub triggers: Vec<Trigger>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Automation {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Decode an exported document, rebuilding each trigger from its `type` tag.
    pub fn from_export(mut value: Value) -> Result<Self, Error> {
        let raw_triggers = match value.as_object_mut().and_then(|o| o.remove("triggers")) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(Error::Validation(format!(
                    "automation triggers must be an array, got {other}"
                )));
            }
        };

        let mut automation: Self = serde_json::from_value(value)?;
        automation.triggers = raw_triggers
            .into_iter()
            .map(Trigger::from_value)
            .collect::<Result<_, _>>()?;
        Ok(automation)
    }
}

/// `/operations-manager/automations`
pub struct Automations<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Automations<'_> {
    fn item(id: &str) -> String {
        format!("{AUTOMATIONS}/{}", encode_segment(id))
    }

    pub async fn get_all(&self) -> Result<Vec<Automation>, Error> {
        self.api.paginate(AUTOMATIONS, &QueryParams::new()).await
    }

    pub async fn get(&self, id: &str) -> Result<Automation, Error> {
        self.api.get_one(&Self::item(id), "automation").await
    }

    pub async fn create(&self, automation: &Automation) -> Result<Automation, Error> {
        let op = Operation::post(AUTOMATIONS).json(automation)?.expect(200);
        self.api
            .call::<Wrapped<Automation>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.api
            .delete(&Self::item(id))
            .await
            .map_err(not_found("automation"))
    }

    /// `PUT {"automations": [automation]}`
    pub async fn import(&self, automation: &Automation) -> Result<Value, Error> {
        self.import_transformed(serde_json::to_value(automation)?)
            .await
    }

    /// Import a document that has already been reshaped for the wire.
    pub async fn import_transformed(&self, document: Value) -> Result<Value, Error> {
        let op = Operation::put(AUTOMATIONS).json_value(json!({ "automations": [document] }));
        self.api.call(op).await
    }

    /// Export one automation with typed triggers.
    pub async fn export(&self, id: &str) -> Result<Automation, Error> {
        let path = format!("{}/export", Self::item(id));
        let raw: Wrapped<Value> = self
            .api
            .call(Operation::get(path))
            .await
            .map_err(not_found("automation"))?;
        Automation::from_export(raw.into_inner())
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_triggers_are_serialized() {
        let automation = Automation {
            name: "a".into(),
            ..Automation::default()
        };
        let out = serde_json::to_value(&automation).unwrap();
        assert_eq!(out["triggers"], json!([]));
        assert_eq!(out["gbac"], json!({"read": [], "write": []}));
    }

    #[test]
    fn export_rebuilds_triggers() {
        let automation = Automation::from_export(json!({
            "_id": "a1",
            "name": "Deploy",
            "componentType": "workflows",
            "triggers": [
                {"type": "endpoint", "name": "api", "routeName": "deploy"},
                {"type": "manual", "name": "ui", "formId": null},
            ],
        }))
        .unwrap();
        assert_eq!(automation.triggers.len(), 2);
        assert!(matches!(&automation.triggers[0], Trigger::Endpoint(t) if t.route_name == "deploy"));
        assert!(matches!(automation.triggers[1], Trigger::Manual(_)));
        assert_eq!(automation.component_type.as_deref(), Some("workflows"));
    }

    #[test]
    fn export_with_unknown_trigger_fails() {
        let err = Automation::from_export(json!({
            "name": "x",
            "triggers": [{"type": "carrier-pigeon"}],
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
