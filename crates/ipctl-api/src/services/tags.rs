// Tags
//
// Everything except the full listing is a POST with an id in the body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, Wrapped, not_found, null_as_default};
use crate::error::Error;
use crate::request::Operation;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/tags`
pub struct Tags<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Tags<'_> {
    pub async fn get_all(&self) -> Result<Vec<Tag>, Error> {
        self.api.list(Operation::get("/tags/all")).await
    }

    pub async fn get(&self, id: &str) -> Result<Tag, Error> {
        let op = Operation::post("/tags/get")
            .json_value(json!({ "_id": id }))
            .expect(200);
        let tag: Option<Wrapped<Tag>> = self.api.call(op).await.map_err(not_found("tag"))?;
        tag.map(Wrapped::into_inner).ok_or(Error::NotFound("tag"))
    }

    /// Tags attached to the entity `reference_id`.
    pub async fn get_by_reference(&self, reference_id: &str) -> Result<Vec<Tag>, Error> {
        let op = Operation::post("/tags/getTagsByReference")
            .json_value(json!({ "ref_id": reference_id }))
            .expect(200);
        self.api.list(op).await
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<Tag, Error> {
        let op = Operation::post("/tags/create")
            .json_value(json!({ "data": { "name": name, "description": description } }))
            .expect(200);
        self.api
            .call::<Wrapped<Tag>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let op = Operation::post("/tags/delete")
            .json_value(json!({ "_id": id }))
            .expect(200);
        self.api.call_unit(op).await.map_err(not_found("tag"))
    }
}
