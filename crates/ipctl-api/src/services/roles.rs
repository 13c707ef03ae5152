// Authorization roles

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, Wrapped, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const ROLES: &str = "/authorization/roles";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provenance: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed_methods: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed_views: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Role {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// `/authorization/roles`
pub struct Roles<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Roles<'_> {
    fn item(id: &str) -> String {
        format!("{ROLES}/{}", encode_segment(id))
    }

    pub async fn get_all(&self) -> Result<Vec<Role>, Error> {
        self.api.paginate(ROLES, &QueryParams::new()).await
    }

    pub async fn get(&self, id: &str) -> Result<Role, Error> {
        self.api.get_one(&Self::item(id), "role").await
    }

    pub async fn create(&self, role: &Role) -> Result<Role, Error> {
        let op = Operation::post(ROLES)
            .json(&json!({ "role": role }))?
            .expect(200);
        self.api
            .call::<Wrapped<Role>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.api
            .delete(&Self::item(id))
            .await
            .map_err(not_found("role"))
    }
}
