#![allow(clippy::unwrap_used)]
// Integration tests for the resource layer using wiremock.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ipctl_core::services::{Automation, Gbac, Model, ModelAction, ProjectMember};
use ipctl_core::{CoreError, DeleteOptions, Platform, Profile};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Platform) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let addr = server.address();
    let profile = Profile::new(addr.ip().to_string())
        .with_port(addr.port())
        .with_basic_auth("admin", "admin".to_string().into());
    let platform = Platform::connect(profile, CancellationToken::new()).unwrap();
    (server, platform)
}

async fn last_body(server: &MockServer, request_path: &str) -> Value {
    let requests = server.received_requests().await.unwrap();
    let request = requests
        .iter()
        .rev()
        .find(|r| r.url.path() == request_path)
        .unwrap();
    serde_json::from_slice(&request.body).unwrap()
}

fn model_with_actions(actions: Vec<ModelAction>) -> Model {
    Model {
        id: "m1".into(),
        name: "router".into(),
        actions,
        ..Model::default()
    }
}

fn action(workflow: Option<&str>, pre: Option<&str>, post: Option<&str>) -> ModelAction {
    ModelAction {
        id: "act".into(),
        name: "create".into(),
        workflow: workflow.map(Into::into),
        pre_workflow_jst: pre.map(Into::into),
        post_workflow_jst: post.map(Into::into),
        ..ModelAction::default()
    }
}

// ── Automations ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_automation_import_rejects_read_without_write() {
    let (server, platform) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/operations-manager/automations"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let automation = Automation {
        name: "Deploy".into(),
        gbac: Gbac {
            read: vec![json!("operators")],
            write: Vec::new(),
        },
        ..Automation::default()
    };

    let err = platform.automations().import(&automation).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(
        err.to_string(),
        "write group must be configured, when read group present"
    );
}

#[tokio::test]
async fn test_automation_import_without_triggers_sends_empty_array() {
    let (server, platform) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/operations-manager/automations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"imported": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let automation = Automation {
        name: "Deploy".into(),
        ..Automation::default()
    };
    platform.automations().import(&automation).await.unwrap();

    let body = last_body(&server, "/operations-manager/automations").await;
    assert_eq!(body["automations"][0]["triggers"], json!([]));
    assert_eq!(body["automations"][0]["name"], json!("Deploy"));
}

#[tokio::test]
async fn test_automation_clear_stops_at_first_failure() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/operations-manager/automations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "a1", "name": "one"},
                {"_id": "a2", "name": "two"},
                {"_id": "a3", "name": "three"}
            ],
            "metadata": {"total": 3}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/operations-manager/automations/a1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/operations-manager/automations/a2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("automation is running"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/operations-manager/automations/a3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = platform.automations().clear().await.unwrap_err();
    assert_eq!(err.to_string(), "automation is running");
}

// ── Models ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_model_delete_refuses_attached_instances() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/lifecycle-manager/resources/m1/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": "i1", "name": "r1"}, {"_id": "i2", "name": "r2"}],
            "metadata": {"total": 2}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/lifecycle-manager/resources/m1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = platform
        .models()
        .delete_with_options(&model_with_actions(Vec::new()), DeleteOptions::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "model 'router' has 2 attached instances, use --delete-instances to delete all instances"
    );
}

#[tokio::test]
async fn test_model_cascade_skips_missing_workflow_and_warns_on_transformation() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/lifecycle-manager/resources/m1/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/automation-studio/workflows"))
        .and(query_param("equals[_id]", "wf-gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "total": 0})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/automation-studio/workflows"))
        .and(query_param("equals[_id]", "wf1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"_id": "wf1", "name": "Provision"}],
            "total": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/workflow_builder/workflows/delete/Provision"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transformations/jst-broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transformations/jst-post"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"_id": "jst-post", "name": "post"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/transformations/jst-post"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/lifecycle-manager/resources/m1"))
        .and(body_json(json!({
            "queryParameters": {"delete-associated-instances": "true"}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let model = model_with_actions(vec![
        action(Some("wf-gone"), Some("jst-broken"), None),
        action(Some("wf1"), None, Some("jst-post")),
    ]);
    platform
        .models()
        .delete_with_options(
            &model,
            DeleteOptions {
                delete_instances: true,
                delete_related: true,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_model_cascade_aborts_on_workflow_lookup_failure() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/automation-studio/workflows"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/lifecycle-manager/resources/m1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let model = model_with_actions(vec![action(Some("wf1"), None, None)]);
    let err = platform
        .models()
        .delete_with_options(
            &model,
            DeleteOptions {
                delete_instances: true,
                delete_related: true,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "unavailable");
}

// ── Projects ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_project_add_members_prepends_new_members() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/automation-studio/projects/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "_id": "p1",
                "name": "Core",
                "members": [{"type": "account", "reference": "u-old", "role": "owner"}]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/automation-studio/projects/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let new_member = ProjectMember {
        kind: "group".into(),
        reference: "g-new".into(),
        role: "editor".into(),
        ..ProjectMember::default()
    };
    let merged = platform
        .projects()
        .add_members("p1", vec![new_member])
        .await
        .unwrap();
    assert_eq!(merged.len(), 2);

    let body = last_body(&server, "/automation-studio/projects/p1").await;
    assert_eq!(
        body,
        json!({
            "members": [
                {"type": "group", "reference": "g-new", "role": "editor"},
                {"type": "account", "reference": "u-old", "role": "owner"}
            ]
        })
    );
}

// ── Bulk clear and lookups ──────────────────────────────────────────

#[tokio::test]
async fn test_workflow_clear_deletes_each_by_name() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/automation-studio/workflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"_id": "w1", "name": "Port Turn Up"}, {"_id": "w2", "name": "backup"}],
            "total": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/workflow_builder/workflows/delete/Port%20Turn%20Up"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/workflow_builder/workflows/delete/backup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(platform.workflows().clear().await.unwrap(), 2);
}

#[tokio::test]
async fn test_transformation_clear_deletes_each_by_id() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/transformations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"_id": "t1", "name": "normalize"},
                {"_id": "t2", "name": "@platform-default"}
            ],
            "total": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/transformations/t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/transformations/t2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(platform.transformations().clear().await.unwrap(), 2);
}

#[tokio::test]
async fn test_transformation_clear_requires_no_content() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/transformations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"_id": "t1", "name": "normalize"}, {"_id": "t2", "name": "enrich"}],
            "total": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/transformations/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/transformations/t2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = platform.transformations().clear().await.unwrap_err();
    assert!(
        matches!(err, CoreError::Api { status: Some(200), .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn test_json_form_clear_is_one_bulk_call() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/json-forms/forms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "f1", "name": "one"},
            {"_id": "f2", "name": "two"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/json-forms/forms"))
        .and(body_json(json!({"ids": ["f1", "f2"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(platform.json_forms().clear().await.unwrap(), 2);
}

#[tokio::test]
async fn test_json_form_clear_without_forms_sends_nothing() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/json-forms/forms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/json-forms/forms"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert_eq!(platform.json_forms().clear().await.unwrap(), 0);
}

#[tokio::test]
async fn test_group_lookup_by_missing_name() {
    let (server, platform) = setup().await;

    Mock::given(method("GET"))
        .and(path("/authorization/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"_id": "g1", "name": "admins"}],
            "total": 1
        })))
        .mount(&server)
        .await;

    let group = platform.groups().get_by_name("admins").await.unwrap();
    assert_eq!(group.id(), "g1");

    let err = platform.groups().get_by_name("operators").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "item with name 'operators' not found");
}
