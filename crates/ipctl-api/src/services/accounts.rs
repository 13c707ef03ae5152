// Authorization accounts

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const ACCOUNTS: &str = "/authorization/accounts";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "firstname", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inactive: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logged_in: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provenance: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/authorization/accounts`
pub struct Accounts<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Accounts<'_> {
    fn item(id: &str) -> String {
        format!("{ACCOUNTS}/{}", encode_segment(id))
    }

    pub async fn get_all(&self) -> Result<Vec<Account>, Error> {
        self.api.paginate(ACCOUNTS, &QueryParams::new()).await
    }

    pub async fn get(&self, id: &str) -> Result<Account, Error> {
        self.api.get_one(&Self::item(id), "account").await
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Account, Error> {
        let found: Vec<Account> = self
            .api
            .paginate(ACCOUNTS, &QueryParams::equals("username", username))
            .await?;
        found
            .into_iter()
            .find(|a| a.username == username)
            .ok_or(Error::NotFound("account"))
    }

    pub async fn activate(&self, id: &str) -> Result<(), Error> {
        self.set_inactive(id, false).await
    }

    pub async fn deactivate(&self, id: &str) -> Result<(), Error> {
        self.set_inactive(id, true).await
    }

    async fn set_inactive(&self, id: &str, inactive: bool) -> Result<(), Error> {
        let op = Operation::patch(Self::item(id)).json_value(json!({ "inactive": inactive }));
        self.api.call_unit(op).await.map_err(not_found("account"))
    }
}
