use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::ApiClient;
use crate::error::Error;

const SETTINGS: &str = "/user/settings";

/// Per-user preferences. Opaque apart from the owning account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

/// `/user/settings`
pub struct UserSettingsService<'a> {
    pub(crate) api: &'a ApiClient,
}

impl UserSettingsService<'_> {
    pub async fn get(&self) -> Result<UserSettings, Error> {
        self.api.get(SETTINGS).await
    }

    pub async fn update(&self, settings: &UserSettings) -> Result<UserSettings, Error> {
        self.api.put(SETTINGS, settings).await
    }
}
