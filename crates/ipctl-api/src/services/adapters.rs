// Adapters
//
// Create, update and import all wrap the adapter document as
// `{"properties": …}`. Adapters are addressed by name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, Wrapped, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const ADAPTERS: &str = "/adapters";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adapter {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_encrypted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logger_props: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/adapters`
pub struct Adapters<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Adapters<'_> {
    fn item(name: &str) -> String {
        format!("{ADAPTERS}/{}", encode_segment(name))
    }

    pub async fn get_all(&self) -> Result<Vec<Adapter>, Error> {
        self.api.paginate(ADAPTERS, &QueryParams::new()).await
    }

    pub async fn get(&self, name: &str) -> Result<Adapter, Error> {
        self.api.get_one(&Self::item(name), "adapter").await
    }

    pub async fn create(&self, adapter: &Adapter) -> Result<Adapter, Error> {
        let op = Operation::post(ADAPTERS)
            .json(&json!({ "properties": adapter }))?
            .expect(200);
        self.api
            .call::<Wrapped<Adapter>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn update(&self, adapter: &Adapter) -> Result<Adapter, Error> {
        let op = Operation::put(Self::item(&adapter.name)).json(&json!({ "properties": adapter }))?;
        self.api
            .call::<Wrapped<Adapter>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn delete(&self, name: &str) -> Result<(), Error> {
        self.api
            .delete(&Self::item(name))
            .await
            .map_err(not_found("adapter"))
    }

    pub async fn start(&self, name: &str) -> Result<(), Error> {
        self.lifecycle(name, "start").await
    }

    pub async fn stop(&self, name: &str) -> Result<(), Error> {
        self.lifecycle(name, "stop").await
    }

    pub async fn restart(&self, name: &str) -> Result<(), Error> {
        self.lifecycle(name, "restart").await
    }

    async fn lifecycle(&self, name: &str, verb: &str) -> Result<(), Error> {
        let path = format!("{}/{verb}", Self::item(name));
        self.api
            .call_unit(Operation::put(path))
            .await
            .map_err(not_found("adapter"))
    }

    pub async fn import(&self, adapter: &Adapter) -> Result<Adapter, Error> {
        let op = Operation::post(format!("{ADAPTERS}/import"))
            .json(&json!({ "properties": adapter }))?
            .expect(200);
        self.api
            .call::<Wrapped<Adapter>>(op)
            .await
            .map(Wrapped::into_inner)
    }
}
