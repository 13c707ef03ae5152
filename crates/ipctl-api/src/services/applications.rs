// Platform applications

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::{ApiClient, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const APPLICATIONS: &str = "/applications";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logger_props: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/applications`
pub struct Applications<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Applications<'_> {
    fn item(name: &str) -> String {
        format!("{APPLICATIONS}/{}", encode_segment(name))
    }

    pub async fn get_all(&self) -> Result<Vec<Application>, Error> {
        self.api.paginate(APPLICATIONS, &QueryParams::new()).await
    }

    pub async fn get(&self, name: &str) -> Result<Application, Error> {
        self.api.get_one(&Self::item(name), "application").await
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
            .map_err(not_found("application"))
    }
}
