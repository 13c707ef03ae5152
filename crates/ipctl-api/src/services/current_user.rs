use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::{ApiClient, null_as_default};
use crate::error::Error;

/// The account behind the current session, from `GET /whoami`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(rename = "firstname", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provenance: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub struct CurrentUsers<'a> {
    pub(crate) api: &'a ApiClient,
}

impl CurrentUsers<'_> {
    pub async fn get(&self) -> Result<CurrentUser, Error> {
        self.api.get("/whoami").await
    }
}
