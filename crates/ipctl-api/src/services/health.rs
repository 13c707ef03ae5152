// Platform health
//
// Read-through views of `/health/*`. Only a handful of fields are typed;
// everything else rides along in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::{ApiClient, null_as_default};
use crate::error::Error;
use crate::request::Operation;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHealth {
    #[serde(default, deserialize_with = "null_as_default")]
    pub host: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub server_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<Value>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apps: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adapters: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One application or adapter as reported by the health endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub package_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default)]
    pub connection: Option<Value>,
    #[serde(default)]
    pub uptime: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/health`
pub struct Health<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Health<'_> {
    pub async fn status(&self) -> Result<StatusHealth, Error> {
        self.api.get("/health/status").await
    }

    pub async fn system(&self) -> Result<Value, Error> {
        self.api.get("/health/system").await
    }

    pub async fn server(&self) -> Result<Value, Error> {
        self.api.get("/health/server").await
    }

    pub async fn applications(&self) -> Result<Vec<ComponentHealth>, Error> {
        self.api.list(Operation::get("/health/applications")).await
    }

    pub async fn adapters(&self) -> Result<Vec<ComponentHealth>, Error> {
        self.api.list(Operation::get("/health/adapters")).await
    }
}
