// Operations Manager triggers
//
// A trigger's `type` field selects one of four shapes. Manual triggers
// round-trip an unset form as JSON `null`, which the server requires.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::api::{ApiClient, Wrapped, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const TRIGGERS: &str = "/operations-manager/triggers";

/// Fields every trigger variant carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerCommon {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointTrigger {
    #[serde(flatten)]
    pub common: TriggerCommon,
    #[serde(default, deserialize_with = "null_as_default")]
    pub route_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verb: String,
    #[serde(default)]
    pub schema: Value,
    #[serde(default)]
    pub jst: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub legacy_wrapper: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSystemTrigger {
    #[serde(flatten)]
    pub common: TriggerCommon,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,
    #[serde(default)]
    pub schema: Value,
    #[serde(default)]
    pub jst: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub legacy_wrapper: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualTrigger {
    #[serde(flatten)]
    pub common: TriggerCommon,
    /// Empty string is written as `null`.
    #[serde(default, serialize_with = "empty_as_null", deserialize_with = "null_as_default")]
    pub form_id: String,
    #[serde(default, serialize_with = "empty_as_null", deserialize_with = "null_as_default")]
    pub form_schema_hash: String,
    #[serde(default)]
    pub form_data: Value,
    #[serde(default)]
    pub jst: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub legacy_wrapper: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTrigger {
    #[serde(flatten)]
    pub common: TriggerCommon,
    #[serde(default)]
    pub first_run_at: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub process_missed_runs: String,
    #[serde(default)]
    pub repeat_unit: Option<String>,
    #[serde(default)]
    pub repeat_frequency: Option<i64>,
    #[serde(default)]
    pub repeat_interval: Option<i64>,
    #[serde(default, serialize_with = "empty_as_null", deserialize_with = "null_as_default")]
    pub form_id: String,
    #[serde(default)]
    pub form_data: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An automation trigger, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Trigger {
    Endpoint(EndpointTrigger),
    EventSystem(EventSystemTrigger),
    Manual(ManualTrigger),
    Schedule(ScheduleTrigger),
}

impl Trigger {
    /// Wire tag of this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Endpoint(_) => "endpoint",
            Self::EventSystem(_) => "eventSystem",
            Self::Manual(_) => "manual",
            Self::Schedule(_) => "schedule",
        }
    }

    pub fn common(&self) -> &TriggerCommon {
        match self {
            Self::Endpoint(t) => &t.common,
            Self::EventSystem(t) => &t.common,
            Self::Manual(t) => &t.common,
            Self::Schedule(t) => &t.common,
        }
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }

    /// Rebuild a typed trigger from an opaque JSON object.
    ///
    /// Fails with a validation error naming the tag when it is missing or
    /// not one of the four known kinds.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Validation("trigger is missing its type".into()))?;
        if !matches!(kind, "endpoint" | "eventSystem" | "manual" | "schedule") {
            return Err(Error::Validation(format!("unknown trigger type '{kind}'")));
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn empty_as_null<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_str(value)
    }
}

// ── Service ──────────────────────────────────────────────────────────

/// `/operations-manager/triggers`
pub struct Triggers<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Triggers<'_> {
    pub async fn get_all(&self) -> Result<Vec<Trigger>, Error> {
        self.api.paginate(TRIGGERS, &QueryParams::new()).await
    }

    pub async fn get(&self, id: &str) -> Result<Trigger, Error> {
        self.api
            .get_one(&format!("{TRIGGERS}/{}", encode_segment(id)), "trigger")
            .await
    }

    pub async fn create(&self, trigger: &Trigger) -> Result<Trigger, Error> {
        let op = Operation::post(TRIGGERS).json(trigger)?.expect(200);
        self.api
            .call::<Wrapped<Trigger>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.api
            .delete(&format!("{TRIGGERS}/{}", encode_segment(id)))
            .await
            .map_err(not_found("trigger"))
    }

    /// Delete every trigger bound to automation `action_id`.
    pub async fn delete_by_action(&self, action_id: &str) -> Result<(), Error> {
        self.api
            .delete(&format!("{TRIGGERS}/action/{}", encode_segment(action_id)))
            .await
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn manual_trigger_empty_form_serializes_null() {
        let input = json!({
            "type": "manual",
            "name": "Run",
            "enabled": true,
            "formId": "",
        });
        let trigger: Trigger = serde_json::from_value(input).unwrap();
        let out = serde_json::to_value(&trigger).unwrap();
        assert_eq!(out["formId"], Value::Null);
        assert_eq!(out["formSchemaHash"], Value::Null);
        assert_eq!(out["type"], "manual");
    }

    #[test]
    fn null_form_decodes_as_empty() {
        let trigger: ManualTrigger =
            serde_json::from_value(json!({"name": "m", "formId": null})).unwrap();
        assert_eq!(trigger.form_id, "");
    }

    #[test]
    fn endpoint_variant_by_tag() {
        let trigger = Trigger::from_value(json!({
            "type": "endpoint",
            "name": "hook",
            "routeName": "deploy",
            "verb": "POST",
            "migrationVersion": 3,
        }))
        .unwrap();
        let Trigger::Endpoint(endpoint) = &trigger else {
            panic!("expected endpoint, got {trigger:?}");
        };
        assert_eq!(endpoint.route_name, "deploy");
        assert_eq!(endpoint.extra["migrationVersion"], 3);
        assert_eq!(trigger.kind(), "endpoint");
    }

    #[test]
    fn unknown_tag_rejected() {
        let err = Trigger::from_value(json!({"type": "webhook", "name": "x"})).unwrap_err();
        assert_eq!(err.to_string(), "unknown trigger type 'webhook'");
        assert!(serde_json::from_value::<Trigger>(json!({"type": "webhook"})).is_err());
    }

    #[test]
    fn every_variant_keeps_its_tag() {
        for kind in ["endpoint", "eventSystem", "manual", "schedule"] {
            let trigger = Trigger::from_value(json!({"type": kind, "name": "t"})).unwrap();
            assert_eq!(trigger.kind(), kind);
            let back = serde_json::to_value(&trigger).unwrap();
            assert_eq!(back["type"], kind);
        }
    }
}
