#![allow(clippy::unwrap_used)]
// Integration tests for the service facades using wiremock.

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ipctl_api::services::{Automation, Gbac, Project, Trigger};
use ipctl_api::{ApiClient, Error, Profile};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
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
    let api = ApiClient::from_profile(profile).unwrap();
    (server, api)
}

/// Body of the last request sent to `request_path`.
async fn last_body(server: &MockServer, request_path: &str) -> Value {
    let requests = server.received_requests().await.unwrap();
    let request = requests
        .iter()
        .rev()
        .find(|r| r.url.path() == request_path)
        .unwrap();
    serde_json::from_slice(&request.body).unwrap()
}

// ── Automations ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_automation_export_builds_trigger_variants() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/operations-manager/automations/a1/export"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "_id": "a1",
                "name": "Deploy",
                "gbac": {"read": [], "write": []},
                "triggers": [
                    {"type": "endpoint", "name": "api", "routeName": "deploy", "verb": "POST"},
                    {"type": "manual", "name": "ui", "formId": null, "formSchemaHash": null}
                ]
            }
        })))
        .mount(&server)
        .await;

    let automation = api.automations().export("a1").await.unwrap();

    assert_eq!(automation.triggers.len(), 2);
    match &automation.triggers[0] {
        Trigger::Endpoint(t) => assert_eq!(t.route_name, "deploy"),
        other => panic!("expected endpoint trigger, got {other:?}"),
    }
    assert!(matches!(automation.triggers[1], Trigger::Manual(_)));
}

#[tokio::test]
async fn test_automation_import_sends_empty_triggers_array() {
    let (server, api) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/operations-manager/automations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"imported": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let automation = Automation {
        name: "Nightly".into(),
        gbac: Gbac::default(),
        ..Automation::default()
    };
    api.automations().import(&automation).await.unwrap();

    let body = last_body(&server, "/operations-manager/automations").await;
    assert_eq!(body["automations"][0]["name"], "Nightly");
    assert_eq!(body["automations"][0]["triggers"], json!([]));
}

// ── Projects ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_project_import_prunes_folders() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/automation-studio/projects/import"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"_id": "p2", "name": "Demo"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let project: Project = serde_json::from_value(json!({
        "_id": "p1",
        "name": "Demo",
        "members": [{"type": "account", "reference": "u1", "role": "owner"}],
        "accessControl": {"manage": ["u1"], "write": [], "execute": [], "read": []},
        "componentIidIndex": 2,
        "folders": [{
            "iid": 1, "nodeType": "folder", "name": "F",
            "children": [{"iid": 2, "nodeType": "component", "name": "X", "children": null}]
        }]
    }))
    .unwrap();

    let imported = api.projects().import(&project).await.unwrap();
    assert_eq!(imported.id(), "p2");

    let body = last_body(&server, "/automation-studio/projects/import").await;
    assert_eq!(body["conflictMode"], "insert-new");
    assert_eq!(
        body["project"]["folders"],
        json!([{
            "nodeType": "folder",
            "name": "F",
            "children": [{"nodeType": "component", "iid": 2}]
        }])
    );
    let view = body["project"].as_object().unwrap();
    assert!(!view.contains_key("members"));
    assert!(!view.contains_key("accessControl"));
    assert!(!view.contains_key("componentIidIndex"));
}

// ── Workflows ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_workflow_get_by_name() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/automation-studio/workflows"))
        .and(query_param("equals[name]", "Missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "total": 0})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/automation-studio/workflows"))
        .and(query_param("equals[name]", "Twice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"name": "Twice"}, {"name": "Twice"}],
            "total": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/automation-studio/workflows"))
        .and(query_param("equals[name]", "Once"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"_id": "w1", "name": "Once", "type": "automation"}],
            "total": 1
        })))
        .mount(&server)
        .await;

    let err = api.workflows().get("Missing").await.unwrap_err();
    assert_eq!(err.to_string(), "workflow not found");
    assert!(err.is_not_found());

    let err = api.workflows().get("Twice").await.unwrap_err();
    assert_eq!(err.to_string(), "unable to find workflow");

    let wf = api.workflows().get("Once").await.unwrap();
    assert_eq!(wf.id(), "w1");
}

#[tokio::test]
async fn test_workflow_delete_and_export_paths() {
    let (server, api) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/workflow_builder/workflows/delete/My%20Flow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/workflow_builder/export"))
        .and(body_json(json!({"options": {"name": "My Flow"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "My Flow",
            "type": "automation",
            "tasks": {"workflow_start": {}, "workflow_end": {}},
            "transitions": {"workflow_start": {"workflow_end": {}}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    api.workflows().delete("My Flow").await.unwrap();
    let exported = api.workflows().export("My Flow").await.unwrap();
    assert_eq!(exported.tasks.len(), 2);
    assert_eq!(exported.kind, "automation");
}

// ── Models ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_model_delete_with_instances_sends_options_body() {
    let (server, api) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/lifecycle-manager/resources/m1"))
        .and(body_json(json!({
            "queryParameters": {"delete-associated-instances": "true"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    api.models().delete("m1", true).await.unwrap();
}

#[tokio::test]
async fn test_model_delete_without_instances_has_no_body() {
    let (server, api) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/lifecycle-manager/resources/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    api.models().delete("m1", false).await.unwrap();
    let requests = server.received_requests().await.unwrap();
    let delete = requests.iter().find(|r| r.method.as_str() == "DELETE").unwrap();
    assert!(delete.body.is_empty());
}

// ── Transformations ─────────────────────────────────────────────────

#[tokio::test]
async fn test_transformation_get_by_name_skips_system_entries() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/transformations"))
        .and(query_param("contains[name]", "normalize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"_id": "sys", "name": "@normalize"},
                {"_id": "t1", "name": "normalize"}
            ],
            "total": 2
        })))
        .mount(&server)
        .await;

    let found = api.transformations().get_by_name("normalize").await.unwrap();
    assert_eq!(found.id(), "t1");

    let err = api.transformations().get_by_name("@normalize").await.unwrap_err();
    assert_eq!(err.to_string(), "transformation not found");
}

// ── JSON forms ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_json_form_delete_is_bulk() {
    let (server, api) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/json-forms/forms"))
        .and(body_json(json!({"ids": ["f1", "f2"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"n": 2})))
        .expect(1)
        .mount(&server)
        .await;

    api.json_forms().delete(&["f1", "f2"]).await.unwrap();
}

// ── Lookup sentinels ────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_sentinels() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/authorization/accounts/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mop/listAnAnalyticTemplate/nope"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/configuration_manager/configs/nope"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/configuration_manager/devices"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"entity": "device", "total": 0, "list": []})),
        )
        .mount(&server)
        .await;

    let err = api.accounts().get("nope").await.unwrap_err();
    assert!(matches!(err, Error::NotFound("account")));
    assert_eq!(err.to_string(), "account not found");

    let err = api.analytic_templates().get("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "analytic template not found");

    let err = api.golden_configs().get("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "gctree not found");

    let err = api.devices().get("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "device not found");
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_devices_split_properties() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/configuration_manager/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entity": "device",
            "total": 1,
            "list": [{
                "name": "r1",
                "host": "nso",
                "ostype": "cisco-ios",
                "device-type": "cli",
                "actions": [],
                "origins": ["nso"],
                "ipaddress": "10.1.1.1"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let devices = api.devices().get_all().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].ostype, "cisco-ios");
    assert_eq!(devices[0].properties["ipaddress"], "10.1.1.1");

    let body = last_body(&server, "/configuration_manager/devices").await;
    assert_eq!(body["options"]["limit"], 100);
    assert_eq!(body["options"]["start"], 0);
}

// ── Misc paths ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_adapter_lifecycle_and_device_group_paths() {
    let (server, api) = setup().await;

    for action in ["start", "stop", "restart"] {
        Mock::given(method("PUT"))
            .and(path(format!("/adapters/local_aaa/{action}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/configuration_manager/deviceGroups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "g1", "name": "core", "devices": ["r1"]}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/configuration_manager/devicegroups/g1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": "g1", "name": "core", "devices": ["r1"]}
        )))
        .mount(&server)
        .await;

    api.adapters().start("local_aaa").await.unwrap();
    api.adapters().stop("local_aaa").await.unwrap();
    api.adapters().restart("local_aaa").await.unwrap();

    let groups = api.device_groups().get_all().await.unwrap();
    assert_eq!(groups[0].name, "core");
    let group = api.device_groups().get("g1").await.unwrap();
    assert_eq!(group.devices, vec!["r1".to_string()]);
}

// ── Configuration manager extras ────────────────────────────────────

#[tokio::test]
async fn test_template_search_and_jinja2_render() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/configuration_manager/templates/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "t1", "name": "ntp", "deviceType": "cisco-ios", "template": "ntp server {{ ip }}"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/configuration_manager/jinja2"))
        .and(body_json(json!({
            "template": "ntp server {{ ip }}",
            "variables": {"ip": "10.0.0.1"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("ntp server 10.0.0.1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/configuration_manager/configurations/parser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{"name": "cisco-ios"}, {"name": "junos"}]
        })))
        .mount(&server)
        .await;

    let templates = api.configuration_templates();
    let ntp = templates.get_by_name("ntp").await.unwrap();
    assert_eq!(ntp.id(), "t1");
    assert_eq!(ntp.device_type, "cisco-ios");

    let body = last_body(&server, "/configuration_manager/templates/search").await;
    assert_eq!(body, json!({"options": {"equals[name]": "ntp"}}));

    let rendered = templates
        .render_jinja2(&ntp.template, &json!({"ip": "10.0.0.1"}))
        .await
        .unwrap();
    assert_eq!(rendered, "ntp server 10.0.0.1");

    let parsers = api.golden_configs().parsers().await.unwrap();
    let names: Vec<_> = parsers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["cisco-ios", "junos"]);
}

// ── Null-tolerant decoding ────────────────────────────────────────

#[tokio::test]
async fn test_lists_tolerate_null_fields() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/operations-manager/automations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "a1", "name": "Nightly", "description": "x", "triggers": []},
                {"_id": "a2", "name": "Legacy", "description": null, "gbac": null, "triggers": null}
            ],
            "metadata": {"total": 2}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transformations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"_id": "t1", "name": "map", "description": null, "functions": null}],
            "total": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/authorization/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"_id": "u1", "username": "admin", "provenance": null, "inactive": null}],
            "total": 1
        })))
        .mount(&server)
        .await;

    let automations = api.automations().get_all().await.unwrap();
    assert_eq!(automations.len(), 2);
    assert_eq!(automations[1].name, "Legacy");
    assert_eq!(automations[1].description, "");
    assert_eq!(automations[1].gbac, Gbac::default());
    assert!(automations[1].triggers.is_empty());

    let transformations = api.transformations().get_all().await.unwrap();
    assert_eq!(transformations[0].description, "");
    assert!(transformations[0].functions.is_empty());

    let accounts = api.accounts().get_all().await.unwrap();
    assert_eq!(accounts[0].provenance, "");
    assert!(!accounts[0].inactive);
}

// ── Read-only catalogs ──────────────────────────────────────────────

#[tokio::test]
async fn test_tags_triggers_and_authorization_catalogs() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/tags/getTagsByReference"))
        .and(body_json(json!({"ref_id": "wf-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "tag-1", "name": "prod"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/operations-manager/triggers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "tr1", "type": "manual", "name": "Run", "formId": null},
                {"_id": "tr2", "type": "endpoint", "name": "Hook", "routeName": "hook", "verb": "POST"}
            ],
            "metadata": {"total": 2}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/authorization/views"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"path": "/automation-studio", "provenance": "AutomationStudio"}],
            "total": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/authorization/methods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"name": "getWorkflows", "provenance": "WorkFlowEngine"}],
            "total": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "admin", "settings": {"theme": "dark"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/integrations/pet%20store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let tags = api.tags().get_by_reference("wf-1").await.unwrap();
    assert_eq!(tags[0].name, "prod");

    let triggers = api.triggers().get_all().await.unwrap();
    assert_eq!(triggers.len(), 2);
    assert_eq!(triggers[0].kind(), "manual");
    assert_eq!(triggers[1].name(), "Hook");

    let views = api.views().get_all().await.unwrap();
    assert_eq!(views[0].path, "/automation-studio");
    let methods = api.methods().get_all().await.unwrap();
    assert_eq!(methods[0].name, "getWorkflows");

    let settings = api.user_settings().get().await.unwrap();
    assert_eq!(settings.username.as_deref(), Some("admin"));
    assert_eq!(settings.settings["theme"], "dark");

    api.integrations().delete("pet store").await.unwrap();
}

#[tokio::test]
async fn test_triggers_delete_by_action() {
    let (server, api) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/operations-manager/triggers/action/auto%201"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 2})))
        .expect(1)
        .mount(&server)
        .await;

    api.triggers().delete_by_action("auto 1").await.unwrap();
}
