// JSON Forms

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, Wrapped, encode_segment, null_as_default};
use crate::error::Error;
use crate::request::Operation;

const FORMS: &str = "/json-forms/forms";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonForm {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "struct", default, deserialize_with = "null_as_default")]
    pub structure: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schema: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ui_schema: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub binding_schema: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub validation_schema: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JsonForm {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// `/json-forms`
pub struct JsonForms<'a> {
    pub(crate) api: &'a ApiClient,
}

impl JsonForms<'_> {
    /// The list endpoint is not paginated.
    pub async fn get_all(&self) -> Result<Vec<JsonForm>, Error> {
        self.api.list(Operation::get(FORMS)).await
    }

    pub async fn get(&self, id: &str) -> Result<JsonForm, Error> {
        self.api
            .get_one(&format!("{FORMS}/{}", encode_segment(id)), "form")
            .await
    }

    pub async fn create(&self, form: &JsonForm) -> Result<JsonForm, Error> {
        let op = Operation::post(FORMS).json(form)?.expect(200);
        self.api
            .call::<Wrapped<JsonForm>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    /// Bulk delete: one call for every id.
    pub async fn delete<S: AsRef<str>>(&self, ids: &[S]) -> Result<(), Error> {
        let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
        let op = Operation::delete(FORMS).json(&json!({ "ids": ids }))?;
        self.api.call_unit(op).await
    }

    pub async fn import(&self, form: &JsonForm) -> Result<Value, Error> {
        let op = Operation::post("/json-forms/import/forms")
            .json(&json!({ "forms": [form] }))?
            .expect(200);
        self.api.call(op).await
    }
}
