// Authorization methods (API endpoints a role may be granted)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::{ApiClient, null_as_default};
use crate::error::Error;
use crate::request::QueryParams;

const METHODS: &str = "/authorization/methods";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformMethod {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provenance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/authorization/methods`
pub struct Methods<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Methods<'_> {
    pub async fn get_all(&self) -> Result<Vec<PlatformMethod>, Error> {
        self.api.paginate(METHODS, &QueryParams::new()).await
    }
}
