// Authorization views (UI routes a role may be granted)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::{ApiClient, null_as_default};
use crate::error::Error;
use crate::request::QueryParams;

const VIEWS: &str = "/authorization/views";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct View {
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provenance: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/authorization/views`
pub struct Views<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Views<'_> {
    pub async fn get_all(&self) -> Result<Vec<View>, Error> {
        self.api.paginate(VIEWS, &QueryParams::new()).await
    }
}
