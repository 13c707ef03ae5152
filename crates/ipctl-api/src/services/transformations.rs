// JST transformations

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, Wrapped, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const TRANSFORMATIONS: &str = "/transformations";

/// Canvas position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasView {
    #[serde(default, deserialize_with = "null_as_default")]
    pub col: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub row: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub functions: Vec<Map<String, Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incoming: Vec<Map<String, Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outgoing: Vec<Map<String, Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<CanvasView>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transformation {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Names starting with `@` are reserved for platform-provided entries.
    pub fn is_system(&self) -> bool {
        self.name.starts_with('@')
    }
}

/// `/transformations`
pub struct Transformations<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Transformations<'_> {
    fn item(id: &str) -> String {
        format!("{TRANSFORMATIONS}/{}", encode_segment(id))
    }

    pub async fn get_all(&self) -> Result<Vec<Transformation>, Error> {
        self.api.paginate(TRANSFORMATIONS, &QueryParams::new()).await
    }

    pub async fn get(&self, id: &str) -> Result<Transformation, Error> {
        self.api.get_one(&Self::item(id), "transformation").await
    }

    /// First non-system transformation named exactly `name`.
    pub async fn get_by_name(&self, name: &str) -> Result<Transformation, Error> {
        let candidates: Vec<Transformation> = self
            .api
            .paginate(TRANSFORMATIONS, &QueryParams::contains("name", name))
            .await?;
        candidates
            .into_iter()
            .find(|t| !t.is_system() && t.name == name)
            .ok_or(Error::NotFound("transformation"))
    }

    pub async fn create(&self, transformation: &Transformation) -> Result<Transformation, Error> {
        let op = Operation::post(TRANSFORMATIONS)
            .json(transformation)?
            .expect(200);
        self.api
            .call::<Wrapped<Transformation>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    /// Responds `204 No Content`.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.api
            .call_unit(Operation::delete(Self::item(id)).expect(204))
            .await
            .map_err(not_found("transformation"))
    }

    pub async fn import(&self, transformation: &Transformation) -> Result<Transformation, Error> {
        let op = Operation::post(format!("{TRANSFORMATIONS}/import"))
            .json(&json!({ "transformation": transformation }))?
            .expect(200);
        self.api
            .call::<Wrapped<Transformation>>(op)
            .await
            .map(Wrapped::into_inner)
    }
}
