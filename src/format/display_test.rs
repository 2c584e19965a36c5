// ABOUTME: Tests for display rendering - per-function renderers, tolerance
// ABOUTME: of partial payloads, failures and the generic fallback.

use serde_json::json;

use super::*;
use crate::exec::{ExecutionError, ExecutionResult};

fn render(function_name: &str, data: serde_json::Value) -> String {
    to_display_text(&ExecutionResult::success(function_name, data), function_name)
}

#[test]
fn test_group_thousands() {
    assert_eq!(group_thousands(0.0), "0");
    assert_eq!(group_thousands(999.0), "999");
    assert_eq!(group_thousands(1000.0), "1,000");
    assert_eq!(group_thousands(1234567.0), "1,234,567");
    assert_eq!(group_thousands(-2500000.0), "-2,500,000");
    assert_eq!(group_thousands(1234.5), "1,234.5");
    assert_eq!(group_thousands(0.1239), "0.124");
}

#[test]
fn test_failure_rendering() {
    let result = ExecutionResult::failure(
        "get_project_status",
        ExecutionError::remote(500, "boom", None),
    );
    assert_eq!(
        to_display_text(&result, "get_project_status"),
        "❌ Error executing get_project_status: boom"
    );

    let blank = ExecutionResult::failure(
        "get_project_status",
        ExecutionError::remote(502, "", None),
    );
    assert!(to_display_text(&blank, "get_project_status").ends_with("Unknown error"));
}

#[test]
fn test_financial_analytics() {
    let text = render(
        "get_financial_analytics",
        json!({"data": {
            "revenue": {"total": 2500000, "target": 3000000, "achievement": 83.3},
            "profit": {"amount": 450000, "margin": 18},
            "departments": [
                {"name": "Sales", "revenue": 1200000},
                {"name": "Services", "revenue": 800000},
                {"name": "Support", "revenue": 300000},
                {"name": "Labs", "revenue": 200000}
            ]
        }}),
    );

    assert!(text.starts_with("📊 **Financial Analytics**"));
    assert!(text.contains("💰 **Revenue:** $2,500,000"));
    assert!(text.contains("Target: $3,000,000"));
    assert!(text.contains("Achievement: 83.3%"));
    assert!(text.contains("📈 **Profit:** $450,000"));
    assert!(text.contains("Support: $300,000 revenue"));
    assert!(!text.contains("Labs"));
}

#[test]
fn test_financial_analytics_partial_payload() {
    let text = render(
        "get_financial_analytics",
        json!({"data": {"revenue": {"target": 10}}}),
    );
    assert!(text.contains("**Revenue:** $0"));
    assert!(text.contains("Achievement: 0%"));
    assert!(!text.contains("Profit"));

    assert_eq!(
        render("get_financial_analytics", json!({"status": "ok"})),
        "No financial data available"
    );
}

#[test]
fn test_company_metrics() {
    let text = render(
        "get_company_metrics",
        json!({"data": {
            "employees": {"total": 250, "avgProductivity": 87},
            "customers": {"total": 1200, "satisfaction": 92},
            "projects": {"active": 14, "completionRate": 76}
        }}),
    );
    assert!(text.contains("👥 **Employees:** 250"));
    assert!(text.contains("Productivity: 87%"));
    assert!(text.contains("😊 **Customer Satisfaction:** 92%"));
    assert!(text.contains("Total Customers: 1200"));
    assert!(text.contains("📁 **Projects:** 14 active"));
}

#[test]
fn test_task_list() {
    let mut tasks: Vec<_> = (1..=7)
        .map(|i| json!({"title": format!("Task {}", i), "priority": "high", "status": "pending"}))
        .collect();
    tasks[0]["status"] = json!("completed");
    tasks[1]["status"] = json!("in-progress");
    tasks[2]["dueDate"] = json!("2024-12-31");

    let text = render(
        "manage_tasks",
        json!({"data": {
            "action": "list",
            "tasks": tasks,
            "summary": {"pending": 5, "inProgress": 1, "completed": 1}
        }}),
    );

    assert!(text.starts_with("📋 **Your Tasks** (7 total)"));
    assert!(text.contains("✅ **Task 1**"));
    assert!(text.contains("🔄 **Task 2**"));
    assert!(text.contains("⏳ **Task 3**"));
    assert!(text.contains("Due: 2024-12-31"));
    assert!(text.contains("Due: No deadline"));
    assert!(text.contains("**Task 5**"));
    assert!(!text.contains("**Task 6**"));
    assert!(text.ends_with("📊 Summary: 5 pending, 1 in progress, 1 completed"));
}

#[test]
fn test_task_create_and_unknown_action() {
    let text = render(
        "manage_tasks",
        json!({"data": {"action": "create", "task": {"title": "Ship", "id": "T-1", "priority": "low"}}}),
    );
    assert_eq!(
        text,
        "✅ Task created successfully!\n\n**Ship**\nID: T-1\nPriority: low"
    );

    assert_eq!(
        render("manage_tasks", json!({"data": {"action": "update"}})),
        "Task operation completed"
    );
    assert_eq!(
        render("manage_tasks", json!({"data": {"action": "create"}})),
        "Task operation completed"
    );
}

#[test]
fn test_support_tickets() {
    let created = render(
        "manage_support_tickets",
        json!({"data": {"action": "create", "ticket": {
            "subject": "Login broken", "ticketId": "TCK-7", "status": "new", "priority": "high"
        }}}),
    );
    assert!(created.contains("**Login broken**\nTicket ID: TCK-7\nStatus: new\nPriority: high"));

    let listed = render(
        "manage_support_tickets",
        json!({"data": {"action": "list", "tickets": [
            {"subject": "A", "ticketId": "1", "status": "resolved", "priority": "low"},
            {"subject": "B", "ticketId": "2", "status": "open"}
        ]}}),
    );
    assert!(listed.starts_with("🎫 **Your Support Tickets** (2 total)"));
    assert!(listed.contains("✅ **A**"));
    assert!(listed.contains("🆕 **B**"));
    assert!(listed.contains("ID: 2 | Priority: n/a"));
}

#[test]
fn test_project_status() {
    let single = render(
        "get_project_status",
        json!({"data": {"action": "get", "project": {
            "name": "Apollo", "projectId": "P-1", "status": "active", "progress": 40,
            "budget": {"total": 150000, "spent": 35},
            "team": [{"name": "Ana", "role": "PM"}]
        }}}),
    );
    assert!(single.starts_with("📁 **Project: Apollo**"));
    assert!(single.contains("Progress: 40%"));
    assert!(single.contains("💰 Budget: $150,000 (35% spent)"));
    assert!(single.contains("   - Ana (PM)"));

    let listed = render(
        "get_project_status",
        json!({"data": {"action": "list", "projects": [{"name": "Apollo", "projectId": "P-1", "progress": 40}]}}),
    );
    assert!(listed.contains("📁 **Your Projects** (1 total)"));
    assert!(listed.contains("ID: P-1 | Progress: 40%"));

    assert_eq!(
        render("get_project_status", json!({"data": {}})),
        "Project data retrieved"
    );
}

#[test]
fn test_document_search() {
    let results: Vec<_> = (1..=6)
        .map(|i| json!({"title": format!("Doc {}", i), "type": "pdf", "category": "policy", "excerpt": "..."}))
        .collect();
    let text = render(
        "search_documents",
        json!({"data": {"query": "vacation", "totalResults": 6, "results": results}}),
    );

    assert!(text.starts_with("🔍 **Search Results for \"vacation\"**"));
    assert!(text.contains("Found 6 document(s)"));
    assert!(text.contains("1. **Doc 1**"));
    assert!(text.contains("5. **Doc 5**"));
    assert!(!text.contains("Doc 6"));

    let counted = render(
        "search_documents",
        json!({"data": {"query": "x", "results": [{"title": "Only"}]}}),
    );
    assert!(counted.contains("Found 1 document(s)"));
    assert!(counted.contains("Type: n/a | Category: n/a"));
}

#[test]
fn test_generic_fallback() {
    let text = render("custom_report", json!({"rows": 3}));
    assert_eq!(
        text,
        "✅ custom_report executed successfully.\n\n{\n  \"rows\": 3\n}"
    );
}
