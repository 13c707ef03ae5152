// Service facades
//
// One module per REST sub-tree. Each exposes the entity type(s) it speaks
// and a borrowed facade (`Accounts<'_>`, `Workflows<'_>`, ...) obtained
// from an `ApiClient` accessor. Facades are pass-through: business rules
// belong in `ipctl-core`.

pub mod accounts;
pub mod adapters;
pub mod analytic_templates;
pub mod applications;
pub mod automations;
pub mod command_templates;
pub mod configuration_templates;
pub mod current_user;
pub mod device_groups;
pub mod devices;
pub mod gctrees;
pub mod groups;
pub mod health;
pub mod instances;
pub mod integration_models;
pub mod integrations;
pub mod json_forms;
pub mod methods;
pub mod models;
pub mod prebuilts;
pub mod profiles;
pub mod projects;
pub mod roles;
pub mod tags;
pub mod templates;
pub mod transformations;
pub mod triggers;
pub mod user_settings;
pub mod views;
pub mod workflows;

pub use accounts::{Account, Accounts};
pub use adapters::{Adapter, Adapters};
pub use analytic_templates::{AnalyticTemplate, AnalyticTemplates};
pub use applications::{Application, Applications};
pub use automations::{Automation, Automations, Gbac};
pub use command_templates::{CommandTemplate, CommandTemplates};
pub use configuration_templates::{ConfigurationTemplate, ConfigurationTemplates};
pub use current_user::{CurrentUser, CurrentUsers};
pub use device_groups::{DeviceGroup, DeviceGroups};
pub use devices::{Device, Devices};
pub use gctrees::{ConfigParser, GoldenConfigTree, GoldenConfigs};
pub use groups::{Group, Groups};
pub use health::{ComponentHealth, Health, StatusHealth};
pub use instances::{Instance, Instances, LastAction};
pub use integration_models::{IntegrationModel, IntegrationModels};
pub use integrations::{Integration, Integrations};
pub use json_forms::{JsonForm, JsonForms};
pub use methods::{Methods, PlatformMethod};
pub use models::{Model, ModelAction, Models, RunAction};
pub use prebuilts::{Prebuilt, PrebuiltMetadata, Prebuilts};
pub use profiles::{PlatformProfile, PlatformProfiles, ProfileEntry, ProfileMetadata};
pub use projects::{AccessControl, FolderNode, NodeType, Project, ProjectMember, Projects};
pub use roles::{Role, Roles};
pub use tags::{Tag, Tags};
pub use templates::{Template, Templates};
pub use transformations::{CanvasView, Transformation, Transformations};
pub use triggers::{
    EndpointTrigger, EventSystemTrigger, ManualTrigger, ScheduleTrigger, Trigger, TriggerCommon,
    Triggers,
};
pub use user_settings::{UserSettings, UserSettingsService};
pub use views::{View, Views};
pub use workflows::{Workflow, Workflows};

use crate::api::ApiClient;

impl ApiClient {
    pub fn accounts(&self) -> Accounts<'_> {
        Accounts { api: self }
    }

    pub fn adapters(&self) -> Adapters<'_> {
        Adapters { api: self }
    }

    pub fn analytic_templates(&self) -> AnalyticTemplates<'_> {
        AnalyticTemplates { api: self }
    }

    pub fn applications(&self) -> Applications<'_> {
        Applications { api: self }
    }

    pub fn automations(&self) -> Automations<'_> {
        Automations { api: self }
    }

    pub fn command_templates(&self) -> CommandTemplates<'_> {
        CommandTemplates { api: self }
    }

    pub fn configuration_templates(&self) -> ConfigurationTemplates<'_> {
        ConfigurationTemplates { api: self }
    }

    pub fn current_user(&self) -> CurrentUsers<'_> {
        CurrentUsers { api: self }
    }

    pub fn device_groups(&self) -> DeviceGroups<'_> {
        DeviceGroups { api: self }
    }

    pub fn devices(&self) -> Devices<'_> {
        Devices { api: self }
    }

    pub fn golden_configs(&self) -> GoldenConfigs<'_> {
        GoldenConfigs { api: self }
    }

    pub fn groups(&self) -> Groups<'_> {
        Groups { api: self }
    }

    pub fn health(&self) -> Health<'_> {
        Health { api: self }
    }

    pub fn instances(&self) -> Instances<'_> {
        Instances { api: self }
    }

    pub fn integration_models(&self) -> IntegrationModels<'_> {
        IntegrationModels { api: self }
    }

    pub fn integrations(&self) -> Integrations<'_> {
        Integrations { api: self }
    }

    pub fn json_forms(&self) -> JsonForms<'_> {
        JsonForms { api: self }
    }

    pub fn methods(&self) -> Methods<'_> {
        Methods { api: self }
    }

    pub fn models(&self) -> Models<'_> {
        Models { api: self }
    }

    pub fn prebuilts(&self) -> Prebuilts<'_> {
        Prebuilts { api: self }
    }

    pub fn platform_profiles(&self) -> PlatformProfiles<'_> {
        PlatformProfiles { api: self }
    }

    pub fn projects(&self) -> Projects<'_> {
        Projects { api: self }
    }

    pub fn roles(&self) -> Roles<'_> {
        Roles { api: self }
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags { api: self }
    }

    pub fn templates(&self) -> Templates<'_> {
        Templates { api: self }
    }

    pub fn transformations(&self) -> Transformations<'_> {
        Transformations { api: self }
    }

    pub fn triggers(&self) -> Triggers<'_> {
        Triggers { api: self }
    }

    pub fn user_settings(&self) -> UserSettingsService<'_> {
        UserSettingsService { api: self }
    }

    pub fn views(&self) -> Views<'_> {
        Views { api: self }
    }

    pub fn workflows(&self) -> Workflows<'_> {
        Workflows { api: self }
    }
}
