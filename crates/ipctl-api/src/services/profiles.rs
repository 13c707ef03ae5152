// Platform profiles (server-side runtime configuration sets)
//
// Not to be confused with the client connection [`Profile`](crate::Profile).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const PROFILES: &str = "/profiles";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// List entry: the profile plus whether it is the active one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ProfileMetadata,
    pub profile: PlatformProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_sync: bool,
}

/// `/profiles`
pub struct PlatformProfiles<'a> {
    pub(crate) api: &'a ApiClient,
}

impl PlatformProfiles<'_> {
    fn item(id: &str) -> String {
        format!("{PROFILES}/{}", encode_segment(id))
    }

    pub async fn get_all(&self) -> Result<Vec<ProfileEntry>, Error> {
        self.api.paginate(PROFILES, &QueryParams::new()).await
    }

    pub async fn get(&self, id: &str) -> Result<ProfileEntry, Error> {
        self.api.get_one(&Self::item(id), "profile").await
    }

    pub async fn create(&self, profile: &PlatformProfile) -> Result<Value, Error> {
        let op = Operation::post(PROFILES)
            .json(&json!({ "properties": profile }))?
            .expect(200);
        self.api.call(op).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.api
            .delete(&Self::item(id))
            .await
            .map_err(not_found("profile"))
    }

    /// Make `id` the active profile. Takes effect on the next restart.
    pub async fn activate(&self, id: &str) -> Result<(), Error> {
        let path = format!("{}/active", Self::item(id));
        self.api
            .call_unit(Operation::put(path))
            .await
            .map_err(not_found("profile"))
    }

    pub async fn import(&self, profile: &PlatformProfile) -> Result<Value, Error> {
        let op = Operation::post(format!("{PROFILES}/import"))
            .json(&json!({ "properties": profile }))?
            .expect(200);
        self.api.call(op).await
    }

    pub async fn export(&self, id: &str) -> Result<PlatformProfile, Error> {
        self.get(id).await.map(|entry| entry.profile)
    }
}
