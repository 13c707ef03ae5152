use ipctl_api::ApiClient;
use ipctl_api::services::{Project, ProjectMember};

use crate::error::CoreError;
use crate::helpers::find_by_name;

/// Automation Studio projects.
#[derive(Clone, Copy)]
pub struct ProjectResource<'a> {
    api: &'a ApiClient,
}

impl<'a> ProjectResource<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Project>, CoreError> {
        Ok(self.api.projects().get_all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Project, CoreError> {
        Ok(self.api.projects().get(id).await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Project, CoreError> {
        find_by_name(self.get_all().await?, name, |p| p.name.as_str())
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<Project, CoreError> {
        Ok(self.api.projects().create(name, description).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.api.projects().delete(id).await?)
    }

    pub async fn export(&self, id: &str) -> Result<Project, CoreError> {
        Ok(self.api.projects().export(id).await?)
    }

    /// Import as a new project; the folder tree is pruned on the way out.
    pub async fn import(&self, project: &Project) -> Result<Project, CoreError> {
        Ok(self.api.projects().import(project).await?)
    }

    /// Prepend `members` to the project's current members.
    ///
    /// Duplicates are not filtered.
    pub async fn add_members(
        &self,
        id: &str,
        members: Vec<ProjectMember>,
    ) -> Result<Vec<ProjectMember>, CoreError> {
        let project = self.get(id).await?;
        let mut merged = members;
        merged.extend(project.members);
        self.api.projects().update_members(id, &merged).await?;
        Ok(merged)
    }
}
