// Configuration Manager device groups
//
// The list route is `deviceGroups`, item routes are `devicegroups`, and
// create is the singular `devicegroup`. The server really does differ.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::Operation;

const BASE: &str = "/configuration_manager";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceGroup {
    #[serde(alias = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub devices: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/configuration_manager/deviceGroups`
pub struct DeviceGroups<'a> {
    pub(crate) api: &'a ApiClient,
}

impl DeviceGroups<'_> {
    pub async fn get_all(&self) -> Result<Vec<DeviceGroup>, Error> {
        self.api
            .list(Operation::get(format!("{BASE}/deviceGroups")))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<DeviceGroup, Error> {
        self.api
            .get_one(
                &format!("{BASE}/devicegroups/{}", encode_segment(id)),
                "device group",
            )
            .await
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        devices: &[String],
    ) -> Result<Value, Error> {
        let op = Operation::post(format!("{BASE}/devicegroup"))
            .json_value(json!({
                "groupName": name,
                "groupDescription": description,
                "deviceNames": devices.join(","),
            }))
            .expect(200);
        self.api.call(op).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let op = Operation::delete(format!("{BASE}/devicegroups"))
            .json_value(json!({ "groupIds": [id] }));
        self.api
            .call_unit(op)
            .await
            .map_err(not_found("device group"))
    }
}
