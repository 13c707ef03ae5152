// Automation Studio projects

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::{ApiClient, Wrapped, encode_segment, not_found, null_as_default};
use crate::error::Error;
use crate::request::{Operation, QueryParams};

const PROJECTS: &str = "/automation-studio/projects";

/// Fields the import endpoint rejects.
const IMPORT_EXCLUDED: [&str; 3] = ["componentIidIndex", "members", "accessControl"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    Folder,
    Component,
}

/// One node of a project's folder tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FolderNode>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FolderNode {
    /// Strip what the import endpoint refuses: folders lose `iid`,
    /// components lose `name`, and null `children` are dropped. Recurses.
    pub fn prune_for_import(&mut self) {
        match self.node_type {
            NodeType::Folder => self.iid = None,
            NodeType::Component => self.name = None,
        }
        if let Some(children) = self.children.as_mut() {
            for child in children {
                child.prune_for_import();
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessControl {
    #[serde(default, deserialize_with = "null_as_default")]
    pub manage: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub write: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub execute: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub read: Vec<String>,
}

/// A project member: an account or group reference with a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMember {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub folders: Vec<FolderNode>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<ProjectMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<AccessControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_iid_index: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// The document the import endpoint accepts: excluded fields removed and
    /// the folder tree pruned.
    pub fn import_view(&self) -> Result<Value, Error> {
        let mut pruned = self.clone();
        for node in &mut pruned.folders {
            node.prune_for_import();
        }
        let mut view = serde_json::to_value(&pruned)?;
        if let Some(object) = view.as_object_mut() {
            for key in IMPORT_EXCLUDED {
                object.remove(key);
            }
        }
        Ok(view)
    }
}

/// `/automation-studio/projects`
pub struct Projects<'a> {
    pub(crate) api: &'a ApiClient,
}

impl Projects<'_> {
    fn item(id: &str) -> String {
        format!("{PROJECTS}/{}", encode_segment(id))
    }

    pub async fn get_all(&self) -> Result<Vec<Project>, Error> {
        self.api.paginate(PROJECTS, &QueryParams::new()).await
    }

    pub async fn get(&self, id: &str) -> Result<Project, Error> {
        self.api.get_one(&Self::item(id), "project").await
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<Project, Error> {
        let op = Operation::post(PROJECTS)
            .json_value(json!({ "name": name, "description": description, "components": [] }))
            .expect(200);
        self.api
            .call::<Wrapped<Project>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.api
            .delete(&Self::item(id))
            .await
            .map_err(not_found("project"))
    }

    pub async fn export(&self, id: &str) -> Result<Project, Error> {
        self.api
            .get_one(&format!("{}/export", Self::item(id)), "project")
            .await
    }

    /// `POST {"conflictMode":"insert-new","project": <import view>}`
    pub async fn import(&self, project: &Project) -> Result<Project, Error> {
        let body = json!({
            "conflictMode": "insert-new",
            "project": project.import_view()?,
        });
        let op = Operation::post(format!("{PROJECTS}/import"))
            .json_value(body)
            .expect(200);
        self.api
            .call::<Wrapped<Project>>(op)
            .await
            .map(Wrapped::into_inner)
    }

    /// Replace the member list.
    pub async fn update_members(&self, id: &str, members: &[ProjectMember]) -> Result<(), Error> {
        let op = Operation::patch(Self::item(id)).json(&json!({ "members": members }))?;
        self.api.call_unit(op).await
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn folder_tree_is_pruned() {
        let project: Project = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Demo",
            "componentIidIndex": 4,
            "members": [{"type": "account", "reference": "u1", "role": "owner"}],
            "accessControl": {"manage": ["u1"]},
            "folders": [{
                "iid": 1,
                "nodeType": "folder",
                "name": "F",
                "children": [{"iid": 2, "nodeType": "component", "name": "X", "children": null}],
            }],
        }))
        .unwrap();

        let view = project.import_view().unwrap();
        assert_eq!(
            view["folders"],
            json!([{
                "nodeType": "folder",
                "name": "F",
                "children": [{"nodeType": "component", "iid": 2}],
            }])
        );
        for key in IMPORT_EXCLUDED {
            assert!(view.get(key).is_none(), "{key} should be excluded");
        }
        assert_eq!(view["name"], "Demo");
        // source value is untouched
        assert_eq!(project.folders[0].iid, Some(1));
    }

    #[test]
    fn deep_trees_recurse() {
        let mut node: FolderNode = serde_json::from_value(json!({
            "iid": 1, "nodeType": "folder", "name": "a",
            "children": [{
                "iid": 2, "nodeType": "folder", "name": "b",
                "children": [{"iid": 3, "nodeType": "component", "name": "c"}],
            }],
        }))
        .unwrap();
        node.prune_for_import();
        let inner = &node.children.as_ref().unwrap()[0];
        assert_eq!(inner.iid, None);
        let leaf = &inner.children.as_ref().unwrap()[0];
        assert_eq!(leaf.iid, Some(3));
        assert_eq!(leaf.name, None);
    }
}
