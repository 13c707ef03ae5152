// Authorization groups

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, Wrapped, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const GROUPS: &str = "/authorization/groups";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provenance: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inactive: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_roles: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Group {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// `/authorization/groups`
pub struct Groups<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Groups<'_> {
    fn item(id: &str) -> String {
        format!("{GROUPS}/{}", encode_segment(id))
    }

    pub async fn get_all(&self) -> Result<Vec<Group>, Error> {
        self.api.paginate(GROUPS, &QueryParams::new()).await
    }

    pub async fn get(&self, id: &str) -> Result<Group, Error> {
        self.api.get_one(&Self::item(id), "group").await
    }

    pub async fn create(&self, group: &Group) -> Result<Group, Error> {
        let op = Operation::post(GROUPS)
            .json(&json!({ "group": group }))?
            .expect(200);
        self.api
            .call::<Wrapped<Group>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.api
            .delete(&Self::item(id))
            .await
            .map_err(not_found("group"))
    }
}
