// Resources: business rules layered over the service facades.
//
// Every rule that spans more than one call (GBAC validation, trigger
// rebuilding, cascade delete, member merging, bulk clear) lives here and
// nowhere else. Plain reads go straight to the services.

pub mod authorization;
pub mod automations;
pub mod catalog;
pub mod json_forms;
pub mod models;
pub mod projects;
pub mod transformations;
pub mod workflows;

pub use authorization::{AccountResource, GroupResource, RoleResource};
pub use automations::AutomationResource;
pub use catalog::{DeviceGroupResource, PrebuiltResource, TemplateResource};
pub use json_forms::JsonFormResource;
pub use models::{DeleteOptions, ModelResource};
pub use projects::ProjectResource;
pub use transformations::TransformationResource;
pub use workflows::WorkflowResource;
