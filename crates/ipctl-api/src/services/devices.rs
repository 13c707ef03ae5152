// Configuration Manager devices
//
// Devices are listed with a POST carrying paging options, and each entry
// mixes a fixed header with adapter-specific properties. Recognized keys
// land in the struct, everything else in `properties`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, PAGE_LIMIT, null_as_default};
use crate::error::Error;
use crate::request::Operation;

const DEVICES: &str = "/configuration_manager/devices";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ostype: String,
    #[serde(rename = "device-type", default, deserialize_with = "null_as_default")]
    pub device_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origins: Vec<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct DeviceList {
    #[serde(default, deserialize_with = "null_as_default")]
    total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    list: Vec<Device>,
}

/// `/configuration_manager/devices`
pub struct Devices<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Devices<'_> {
    async fn page(&self, start: u32, filter: &Value) -> Result<DeviceList, Error> {
        let op = Operation::post(DEVICES)
            .json_value(json!({
                "options": {
                    "start": start,
                    "limit": PAGE_LIMIT,
                    "filter": filter,
                    "sort": [{ "name": 1 }],
                    "order": "ascending",
                }
            }))
            .expect(200);
        self.api.call(op).await
    }

    async fn collect(&self, filter: &Value) -> Result<Vec<Device>, Error> {
        let mut all = Vec::new();
        let mut start = 0;
        loop {
            let page = self.page(start, filter).await?;
            let received = page.list.len();
            all.extend(page.list);
            if received == 0 || u64::try_from(all.len()).unwrap_or(u64::MAX) >= page.total {
                break;
            }
            start += PAGE_LIMIT;
        }
        Ok(all)
    }

    pub async fn get_all(&self) -> Result<Vec<Device>, Error> {
        self.collect(&json!({})).await
    }

    pub async fn get(&self, name: &str) -> Result<Device, Error> {
        self.collect(&json!({ "name": name }))
            .await?
            .into_iter()
            .find(|d| d.name == name)
            .ok_or(Error::NotFound("device"))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_go_to_properties() {
        let device: Device = serde_json::from_value(json!({
            "name": "r1",
            "host": "10.0.0.1",
            "ostype": "cisco-ios",
            "device-type": "cli",
            "actions": ["getConfig"],
            "origins": ["nso"],
            "port": 22,
            "ipaddress": "10.0.0.1",
        }))
        .unwrap();
        assert_eq!(device.device_type, "cli");
        assert_eq!(device.properties.len(), 2);
        assert_eq!(device.properties["port"], 22);
    }
}
