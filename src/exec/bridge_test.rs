// ABOUTME: Tests for ExecutionBridge against a mock automation engine -
// ABOUTME: success, remote errors, timeouts, refusals and payload shape.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use super::*;
use crate::catalog::{Catalog, Role};
use crate::config::BridgeConfig;
use crate::profile::{ProfileEntitlement, ProfileMetadata};

const FINANCE_PATH: &str = "/webhook/librechat/financial-analytics";

fn bridge_for(url: &str, config: BridgeConfig) -> ExecutionBridge {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    ExecutionBridge::new(catalog, &config.with_engine_url(url)).unwrap()
}

fn ceo() -> ExecutionContext {
    ExecutionContext::new(Role::Ceo, "user-ceo").with_display_name("ceo")
}

#[tokio::test]
async fn test_success_returns_raw_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(FINANCE_PATH)
            .header("content-type", "application/json")
            .json_body_includes(json!({
                "period": "Q4 2024",
                "_context": {
                    "profileType": "ceo",
                    "userId": "user-ceo",
                    "username": "ceo",
                    "functionName": "get_financial_analytics",
                    "profile": {"profileType": "ceo"}
                }
            }).to_string());
        then.status(200)
            .json_body(json!({"data": {"revenue": {"total": 1000}}}));
    });

    let bridge = bridge_for(&server.base_url(), BridgeConfig::default());
    let result = bridge
        .execute("get_financial_analytics", json!({"period": "Q4 2024"}), &ceo())
        .await;

    assert!(result.is_success(), "{:?}", result.error());
    assert_eq!(result.function_name(), "get_financial_analytics");
    assert_eq!(result.data().unwrap()["data"]["revenue"]["total"], 1000);
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn test_remote_500_carries_status_and_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(FINANCE_PATH);
        then.status(500).json_body(json!({"message": "boom"}));
    });

    let bridge = bridge_for(&server.base_url(), BridgeConfig::default());
    let result = bridge
        .execute("get_financial_analytics", json!({"period": "2024"}), &ceo())
        .await;

    assert!(!result.is_success());
    let error = result.error().unwrap();
    assert_eq!(error.kind, ErrorKind::RemoteError);
    assert_eq!(error.message, "boom");
    assert_eq!(error.code, Some(500));
    assert_eq!(error.details, Some(json!({"message": "boom"})));

    let wire = serde_json::to_value(&result).unwrap();
    assert_eq!(wire["success"], false);
    assert_eq!(wire["error"]["message"], "boom");
    assert_eq!(wire["error"]["code"], 500);
}

#[tokio::test]
async fn test_remote_error_without_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(FINANCE_PATH);
        then.status(404);
    });

    let bridge = bridge_for(&server.base_url(), BridgeConfig::default());
    let result = bridge
        .execute("get_financial_analytics", json!({"period": "2024"}), &ceo())
        .await;

    let error = result.error().unwrap();
    assert_eq!(error.code, Some(404));
    assert!(error.message.contains("HTTP 404"));
    assert!(error.details.is_none());
}

#[tokio::test]
async fn test_unreachable_host() {
    let bridge = bridge_for("http://127.0.0.1:1", BridgeConfig::default());
    let result = bridge
        .execute("get_financial_analytics", json!({"period": "2024"}), &ceo())
        .await;

    let error = result.error().unwrap();
    assert_eq!(error.kind, ErrorKind::Unreachable);
    assert!(error.message.contains("not responding"));
    assert!(error.code.is_none());

    let wire = serde_json::to_value(&result).unwrap();
    assert!(wire["error"].get("code").is_none());
}

#[tokio::test]
async fn test_timeout_is_unreachable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(FINANCE_PATH);
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(json!({}));
    });

    let config = BridgeConfig::default().with_timeout(Duration::from_millis(50));
    let bridge = bridge_for(&server.base_url(), config);
    let result = bridge
        .execute("get_financial_analytics", json!({"period": "2024"}), &ceo())
        .await;

    let error = result.error().unwrap();
    assert_eq!(error.kind, ErrorKind::Unreachable);
    assert!(error.message.contains("timed out"));
}

#[tokio::test]
async fn test_forbidden_never_calls_engine() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(FINANCE_PATH);
        then.status(200).json_body(json!({}));
    });

    let bridge = bridge_for(&server.base_url(), BridgeConfig::default());
    let employee = ExecutionContext::new(Role::Employee, "user-emp");
    let result = bridge
        .execute("get_financial_analytics", json!({"period": "2024"}), &employee)
        .await;

    assert_eq!(result.error().unwrap().kind, ErrorKind::Forbidden);
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_unknown_function_is_not_found() {
    let server = MockServer::start();
    let bridge = bridge_for(&server.base_url(), BridgeConfig::default());
    let result = bridge.execute("launch_rockets", json!({}), &ceo()).await;

    let error = result.error().unwrap();
    assert_eq!(error.kind, ErrorKind::NotFound);
    assert!(error.message.contains("launch_rockets"));
}

#[tokio::test]
async fn test_non_object_arguments_are_malformed() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(FINANCE_PATH);
        then.status(200).json_body(json!({}));
    });

    let bridge = bridge_for(&server.base_url(), BridgeConfig::default());
    let result = bridge
        .execute("get_financial_analytics", json!("Q4"), &ceo())
        .await;

    assert_eq!(result.error().unwrap().kind, ErrorKind::MalformedInput);
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_schema_violations_still_dispatch_with_defaults() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/webhook/librechat/document-search")
            .json_body_includes(json!({"category": "all", "limit": 5.0}).to_string());
        then.status(200).json_body(json!({"data": {"results": []}}));
    });

    let bridge = bridge_for(&server.base_url(), BridgeConfig::default());
    let customer = ExecutionContext::new(Role::Customer, "user-cust");
    let result = bridge
        .execute("search_documents", json!({"limit": "5"}), &customer)
        .await;

    assert!(result.is_success());
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn test_api_key_header_and_profile_snapshot() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/webhook/librechat/task-management")
            .header("X-N8N-API-KEY", "engine-secret")
            .json_body_includes(json!({
                "_context": {
                    "profile": {
                        "profileType": "employee",
                        "department": "Engineering",
                        "companyId": "COMPANY_001",
                        "securityLevel": 3,
                        "permissions": ["knowledge_base"]
                    }
                }
            }).to_string());
        then.status(200).json_body(json!({"data": {"action": "list", "tasks": []}}));
    });

    let profile = ProfileEntitlement::new(Role::Employee)
        .permission("knowledge_base")
        .metadata(ProfileMetadata {
            department: Some("Engineering".into()),
            company_id: Some("COMPANY_001".into()),
            security_level: 3,
            ..Default::default()
        });
    let context = ExecutionContext::new(Role::Employee, "user-emp").with_profile(profile);

    let bridge = bridge_for(
        &format!("{}/", server.base_url()),
        BridgeConfig::default().with_api_key("engine-secret"),
    );
    let result = bridge
        .execute("manage_tasks", json!({"action": "list"}), &context)
        .await;

    assert!(result.is_success(), "{:?}", result.error());
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn test_empty_success_body_is_null_payload() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(FINANCE_PATH);
        then.status(204);
    });

    let bridge = bridge_for(&server.base_url(), BridgeConfig::default());
    let result = bridge
        .execute("get_financial_analytics", json!({"period": "2024"}), &ceo())
        .await;

    assert!(result.is_success());
    assert_eq!(result.data(), Some(&serde_json::Value::Null));
}
