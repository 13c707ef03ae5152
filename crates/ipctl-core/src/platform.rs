// ── Platform facade ──
//
// One connection to one platform instance. Hands out borrowed resources
// for the assets that carry business rules; everything else is reached
// through `api()` and its service facades.

use ipctl_api::services::CurrentUser;
use ipctl_api::{ApiClient, HttpClient, Profile};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::CoreError;
use crate::resources::{
    AccountResource, AutomationResource, DeviceGroupResource, GroupResource, JsonFormResource,
    ModelResource, PrebuiltResource, ProjectResource, RoleResource, TemplateResource,
    TransformationResource, WorkflowResource,
};

/// Cheaply cloneable handle to an authenticated platform client.
///
/// No request is made until the first operation; basic-auth profiles log
/// in lazily on that first call.
#[derive(Debug, Clone)]
pub struct Platform {
    api: ApiClient,
}

impl Platform {
    /// Build a client for `profile` whose requests abort once `cancel` fires.
    pub fn connect(profile: Profile, cancel: CancellationToken) -> Result<Self, CoreError> {
        debug!(host = %profile.host, "preparing platform client");
        let http = HttpClient::with_cancellation(profile, cancel)?;
        Ok(Self::new(ApiClient::new(http)))
    }

    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The underlying service client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The account the profile's credentials resolve to.
    pub async fn whoami(&self) -> Result<CurrentUser, CoreError> {
        Ok(self.api.current_user().get().await?)
    }

    // ── Resources ────────────────────────────────────────────────────

    pub fn accounts(&self) -> AccountResource<'_> {
        AccountResource::new(&self.api)
    }

    pub fn automations(&self) -> AutomationResource<'_> {
        AutomationResource::new(&self.api)
    }

    pub fn device_groups(&self) -> DeviceGroupResource<'_> {
        DeviceGroupResource::new(&self.api)
    }

    pub fn groups(&self) -> GroupResource<'_> {
        GroupResource::new(&self.api)
    }

    pub fn json_forms(&self) -> JsonFormResource<'_> {
        JsonFormResource::new(&self.api)
    }

    pub fn models(&self) -> ModelResource<'_> {
        ModelResource::new(&self.api)
    }

    pub fn prebuilts(&self) -> PrebuiltResource<'_> {
        PrebuiltResource::new(&self.api)
    }

    pub fn projects(&self) -> ProjectResource<'_> {
        ProjectResource::new(&self.api)
    }

    pub fn roles(&self) -> RoleResource<'_> {
        RoleResource::new(&self.api)
    }

    pub fn templates(&self) -> TemplateResource<'_> {
        TemplateResource::new(&self.api)
    }

    pub fn transformations(&self) -> TransformationResource<'_> {
        TransformationResource::new(&self.api)
    }

    pub fn workflows(&self) -> WorkflowResource<'_> {
        WorkflowResource::new(&self.api)
    }
}
