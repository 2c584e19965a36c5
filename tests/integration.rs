// ABOUTME: Integration tests driving the ToolBridge end to end against a
// ABOUTME: mock automation engine and in-memory profiles.

use std::sync::Arc;

use flowbridge::intercept::TOOL_RESULTS_KEY;
use flowbridge::prelude::*;
use httpmock::prelude::*;
use serde_json::json;

const PROJECT_PATH: &str = "/webhook/librechat/project-status";
const FINANCE_PATH: &str = "/webhook/librechat/financial-analytics";
const SEARCH_PATH: &str = "/webhook/librechat/document-search";

fn profiles() -> InMemoryProfiles {
    InMemoryProfiles::new()
        .with_profile(
            "ceo-1",
            ProfileEntitlement::new(Role::Ceo)
                .grant(WorkflowGrant::new("wf_financial_analytics"))
                .grant(WorkflowGrant::new("wf_company_metrics"))
                .grant(WorkflowGrant::new("wf_doc_search")),
        )
        .with_profile(
            "emp-1",
            ProfileEntitlement::new(Role::Employee)
                .grant(WorkflowGrant::new("wf_task_management"))
                .grant(WorkflowGrant::new("wf_doc_search"))
                // Not allowed for employees; must never surface.
                .grant(WorkflowGrant::new("wf_financial_analytics"))
                .metadata(ProfileMetadata {
                    department: Some("Engineering".to_string()),
                    ..Default::default()
                }),
        )
        .with_profile(
            "cust-1",
            ProfileEntitlement::new(Role::Customer)
                .grant(WorkflowGrant::new("wf_project_status"))
                .grant(WorkflowGrant::new("wf_support_ticket"))
                .permission("view_own_projects"),
        )
        .with_profile("admin-1", ProfileEntitlement::new(Role::Admin))
}

fn bridge(engine_url: &str) -> ToolBridge {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let config = BridgeConfig::default().with_engine_url(engine_url);
    ToolBridge::new(catalog, &config, Arc::new(profiles())).unwrap()
}

fn names(tools: &[ToolDescriptor]) -> Vec<&str> {
    tools.iter().map(|t| t.name.as_str()).collect()
}

#[tokio::test]
async fn test_tools_follow_role_and_grants() {
    let server = MockServer::start();
    let bridge = bridge(&server.base_url());

    let ceo = bridge.tools_for(&Identity::new("ceo-1")).await;
    assert_eq!(
        names(&ceo),
        vec!["get_financial_analytics", "get_company_metrics", "search_documents"]
    );

    let employee = bridge.tools_for(&Identity::new("emp-1")).await;
    assert_eq!(names(&employee), vec!["manage_tasks", "search_documents"]);

    assert!(bridge.tools_for(&Identity::new("admin-1")).await.is_empty());
    assert!(bridge.tools_for(&Identity::new("nobody")).await.is_empty());
}

#[tokio::test]
async fn test_inject_tools_appends_without_duplicates() {
    let server = MockServer::start();
    let bridge = bridge(&server.base_url());
    let identity = Identity::new("cust-1");

    let mut request_tools = vec![FunctionTool::new(
        "web_search",
        "Search the web",
        json!({"type": "object"}),
    )];
    let first = bridge.inject_tools(&identity, &mut request_tools).await;
    assert_eq!(first.added, 2);
    assert!(first.shadowed.is_empty());
    let second = bridge.inject_tools(&identity, &mut request_tools).await;
    assert_eq!(second.added, 0);
    assert_eq!(second.shadowed, vec!["get_project_status", "manage_support_tickets"]);

    let injected: Vec<_> = request_tools.iter().map(FunctionTool::name).collect();
    assert_eq!(
        injected,
        vec!["web_search", "get_project_status", "manage_support_tickets"]
    );

    let wire = serde_json::to_string(&request_tools).unwrap();
    assert!(!wire.contains("wf_project_status"));
    assert!(!wire.contains("/webhook/"));
}

#[tokio::test]
async fn test_intercept_executes_only_claimed_calls() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(PROJECT_PATH)
            .json_body_includes(json!({
                "action": "list",
                "_context": {
                    "profileType": "customer",
                    "userId": "cust-1",
                    "username": "Casey",
                    "functionName": "get_project_status",
                    "profile": {"permissions": ["view_own_projects"]}
                }
            }).to_string());
        then.status(200).json_body(json!({
            "success": true,
            "data": {"action": "list", "projects": [{"name": "Apollo", "projectId": "P-1", "progress": 40}]}
        }));
    });

    let bridge = bridge(&server.base_url());
    let response = ChatResponse::from_messages(
        "chatcmpl-9",
        "gpt-4o",
        [AssistantMessage::with_tool_calls(vec![
            ToolCall::new("call_1", "get_project_status", r#"{"action":"list"}"#),
            ToolCall::new("call_2", "web_search", r#"{"q":"news"}"#),
        ])],
    );

    let outcome = bridge
        .intercept(&Identity::new("cust-1").named("Casey"), response.clone(), None)
        .await;

    assert_eq!(mock.calls(), 1);
    assert!(outcome.is_augmented());
    assert_eq!(outcome.results().len(), 1);

    let result = &outcome.results()[0];
    assert!(result.result.is_success());
    assert!(result.display_text().contains("**Apollo**"));

    let out = outcome.response();
    assert_eq!(out.choices, response.choices);
    let attached = out.metadata[TOOL_RESULTS_KEY].as_array().unwrap();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0]["tool_call_id"], "call_1");
}

#[tokio::test]
async fn test_shadowed_tool_calls_stay_with_the_caller() {
    let server = MockServer::start();
    let project = server.mock(|when, then| {
        when.method(POST).path(PROJECT_PATH);
        then.status(200).json_body(json!({"data": {"action": "list", "projects": []}}));
    });
    let support = server.mock(|when, then| {
        when.method(POST).path("/webhook/librechat/support-ticket");
        then.status(200).json_body(json!({"data": {"ticketId": "T-1"}}));
    });
    let bridge = bridge(&server.base_url());
    let identity = Identity::new("cust-1");

    let mut request_tools = vec![FunctionTool::new(
        "get_project_status",
        "The caller's own project lookup",
        json!({"type": "object"}),
    )];
    let injection = bridge.inject_tools(&identity, &mut request_tools).await;
    assert_eq!(injection.added, 1);
    assert_eq!(injection.shadowed, vec!["get_project_status"]);
    assert_eq!(request_tools[0].function.description, "The caller's own project lookup");

    let response = ChatResponse::from_messages(
        "id",
        "m",
        [AssistantMessage::with_tool_calls(vec![
            ToolCall::new("call_1", "get_project_status", "{}"),
            ToolCall::new("call_2", "manage_support_tickets", r#"{"action":"list"}"#),
        ])],
    );
    let outcome = bridge
        .intercept_excluding(&identity, response, &injection.shadowed, None)
        .await;

    assert_eq!(outcome.results().len(), 1);
    assert_eq!(outcome.results()[0].call_id, "call_2");
    assert_eq!(project.calls(), 0);
    assert_eq!(support.calls(), 1);
}

#[tokio::test]
async fn test_intercept_passthrough_without_profile() {
    let server = MockServer::start();
    let bridge = bridge(&server.base_url());
    let response = ChatResponse::from_messages(
        "id",
        "m",
        [AssistantMessage::with_tool_calls(vec![ToolCall::new(
            "call_1",
            "get_project_status",
            "{}",
        )])],
    );

    let outcome = bridge
        .intercept(&Identity::new("nobody"), response.clone(), None)
        .await;
    assert_eq!(outcome, Interception::Passthrough(response));
}

#[tokio::test]
async fn test_authorization_precedes_dispatch() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(FINANCE_PATH);
        then.status(200).json_body(json!({}));
    });
    let bridge = bridge(&server.base_url());

    let result = bridge
        .execute_direct(
            &Identity::new("emp-1"),
            "get_financial_analytics",
            json!({"period": "Q4 2024"}),
        )
        .await
        .unwrap();

    assert!(!result.is_success());
    assert_eq!(result.error().unwrap().kind, ErrorKind::Forbidden);
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_remote_error_surfaces_as_tool_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(SEARCH_PATH);
        then.status(500).json_body(json!({"message": "boom"}));
    });
    let bridge = bridge(&server.base_url());

    let messages = bridge
        .process_tool_calls(
            &Identity::new("ceo-1"),
            &[ToolCall::new("call_7", "search_documents", r#"{"query":"plan"}"#)],
            None,
        )
        .await
        .unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].tool_call_id, "call_7");
    assert_eq!(messages[0].name, "search_documents");
    let result = messages[0].execution_result().unwrap();
    let error = result.error().unwrap();
    assert_eq!(error.message, "boom");
    assert_eq!(error.code, Some(500));
    assert_eq!(
        to_display_text(&result, "search_documents"),
        "❌ Error executing search_documents: boom"
    );
}

#[tokio::test]
async fn test_process_tool_calls_labels_blank_call_ids() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(SEARCH_PATH);
        then.status(200).json_body(json!({"data": {"query": "q", "totalResults": 0}}));
    });
    let bridge = bridge(&server.base_url());

    let messages = bridge
        .process_tool_calls(
            &Identity::new("ceo-1"),
            &[ToolCall::new("", "search_documents", r#"{"query":"q"}"#)],
            None,
        )
        .await
        .unwrap();

    assert_eq!(mock.calls(), 1);
    assert_eq!(messages.len(), 1);
    let id = &messages[0].tool_call_id;
    assert!(id.starts_with("call_"), "unexpected id {id:?}");
    assert!(id.len() > "call_".len());
    assert!(messages[0].execution_result().unwrap().is_success());
}

#[tokio::test]
async fn test_unreachable_engine() {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let config = BridgeConfig::default()
        .with_engine_url("http://127.0.0.1:1")
        .with_timeout(std::time::Duration::from_secs(2));
    let bridge = ToolBridge::new(catalog, &config, Arc::new(profiles())).unwrap();

    let result = bridge
        .execute_direct(
            &Identity::new("ceo-1"),
            "get_company_metrics",
            json!({"metricType": "all"}),
        )
        .await
        .unwrap();

    let error = result.error().unwrap();
    assert_eq!(error.kind, ErrorKind::Unreachable);
    assert!(error.message.contains("not responding"));
    assert!(error.code.is_none());
}

#[tokio::test]
async fn test_direct_execution_requires_profile() {
    let server = MockServer::start();
    let bridge = bridge(&server.base_url());

    let err = bridge
        .execute_direct(&Identity::new("nobody"), "search_documents", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::ProfileNotFound(ref id) if id == "nobody"));

    let err = bridge
        .process_tool_calls(&Identity::new("nobody"), &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::ProfileNotFound(_)));
}

#[tokio::test]
async fn test_registry_for_identity_runs_workflows() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(SEARCH_PATH)
            .json_body_includes(json!({"_context": {"profile": {"department": "Engineering"}}}).to_string());
        then.status(200).json_body(json!({"data": {"query": "onboarding", "totalResults": 0}}));
    });
    let bridge = bridge(&server.base_url());

    let registry = bridge.registry_for(&Identity::new("emp-1")).await;
    assert_eq!(registry.list().await, vec!["manage_tasks", "search_documents"]);

    let tool = registry.get("search_documents").await.unwrap();
    let output = tool.execute(json!({"query": "onboarding"})).await.unwrap();
    assert!(!output.is_error);
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn test_elevated_operations() {
    let server = MockServer::start();
    let bridge = bridge(&server.base_url());

    assert_eq!(bridge.list_all_workflow_definitions(Role::Ceo).unwrap().len(), 6);
    assert_eq!(bridge.list_all_workflow_definitions(Role::Admin).unwrap().len(), 6);
    assert!(matches!(
        bridge.list_all_workflow_definitions(Role::Employee),
        Err(AccessError::ElevatedRoleRequired { role: Role::Employee, .. })
    ));

    bridge.tools_for(&Identity::new("ceo-1")).await;
    assert!(bridge.clear_tool_cache(Role::Ceo).await.is_err());
    assert!(bridge.clear_tool_cache(Role::Admin).await.is_ok());
    assert_eq!(bridge.tools_for(&Identity::new("ceo-1")).await.len(), 3);
}
