// ABOUTME: Human-readable rendering of execution results, with one renderer
// ABOUTME: per built-in workflow and a generic fallback for everything else.

use serde_json::Value;

use crate::exec::ExecutionResult;

type Renderer = fn(&Value) -> String;

/// Renderers keyed by function name.
const RENDERERS: &[(&str, Renderer)] = &[
    ("get_financial_analytics", financial_analytics),
    ("get_company_metrics", company_metrics),
    ("manage_tasks", tasks),
    ("manage_support_tickets", support_tickets),
    ("get_project_status", project_status),
    ("search_documents", document_search),
];

/// Render a result for the end user.
///
/// Payload fields are read from the engine's `data` object; any missing
/// field is skipped or shown with a neutral placeholder.
pub fn to_display_text(result: &ExecutionResult, function_name: &str) -> String {
    let data = match result.outcome() {
        Ok(data) => data,
        Err(error) => {
            let message = if error.message.is_empty() {
                "Unknown error"
            } else {
                error.message.as_str()
            };
            return format!("❌ Error executing {}: {}", function_name, message);
        }
    };

    match RENDERERS.iter().find(|(name, _)| *name == function_name) {
        Some((_, render)) => render(data),
        None => generic(function_name, data),
    }
}

/// Format a number with comma thousands separators and at most three
/// fractional digits.
pub fn group_thousands(value: f64) -> String {
    let mut rendered = format!("{:.3}", value);
    if rendered.contains('.') {
        let trimmed = rendered.trim_end_matches('0').trim_end_matches('.').len();
        rendered.truncate(trimmed);
    }
    if rendered == "-0" {
        rendered = "0".to_string();
    }

    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

fn generic(function_name: &str, data: &Value) -> String {
    let pretty = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    format!("✅ {} executed successfully.\n\n{}", function_name, pretty)
}

/// The engine wraps its results in a `data` object.
fn body(data: &Value) -> Option<&Value> {
    data.get("data").filter(|v| v.is_object())
}

fn section<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

fn list<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    value.get(key).and_then(Value::as_array)
}

fn text_or(value: &Value, key: &str, fallback: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => fallback.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn text(value: &Value, key: &str) -> String {
    text_or(value, key, "n/a")
}

fn number(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => "0".to_string(),
    }
}

fn amount(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_f64)
        .map(group_thousands)
        .unwrap_or_else(|| "0".to_string())
}

fn action(value: &Value) -> Option<&str> {
    value.get("action").and_then(Value::as_str)
}

fn financial_analytics(data: &Value) -> String {
    let Some(body) = body(data) else {
        return "No financial data available".to_string();
    };

    let mut out = String::from("📊 **Financial Analytics**\n\n");
    if let Some(revenue) = section(body, "revenue") {
        out.push_str(&format!("💰 **Revenue:** ${}\n", amount(revenue, "total")));
        out.push_str(&format!("   - Target: ${}\n", amount(revenue, "target")));
        out.push_str(&format!(
            "   - Achievement: {}%\n\n",
            number(revenue, "achievement")
        ));
    }
    if let Some(profit) = section(body, "profit") {
        out.push_str(&format!("📈 **Profit:** ${}\n", amount(profit, "amount")));
        out.push_str(&format!("   - Margin: {}%\n\n", number(profit, "margin")));
    }
    if let Some(departments) = list(body, "departments") {
        out.push_str("🏢 **Department Performance:**\n");
        for dept in departments.iter().take(3) {
            out.push_str(&format!(
                "   - {}: ${} revenue\n",
                text(dept, "name"),
                amount(dept, "revenue")
            ));
        }
    }
    out
}

fn company_metrics(data: &Value) -> String {
    let Some(body) = body(data) else {
        return "No company metrics available".to_string();
    };

    let mut out = String::from("📊 **Company Metrics**\n\n");
    if let Some(employees) = section(body, "employees") {
        out.push_str(&format!("👥 **Employees:** {}\n", number(employees, "total")));
        out.push_str(&format!(
            "   - Productivity: {}%\n\n",
            number(employees, "avgProductivity")
        ));
    }
    if let Some(customers) = section(body, "customers") {
        out.push_str(&format!(
            "😊 **Customer Satisfaction:** {}%\n",
            number(customers, "satisfaction")
        ));
        out.push_str(&format!(
            "   - Total Customers: {}\n\n",
            number(customers, "total")
        ));
    }
    if let Some(projects) = section(body, "projects") {
        out.push_str(&format!("📁 **Projects:** {} active\n", number(projects, "active")));
        out.push_str(&format!(
            "   - Completion Rate: {}%\n\n",
            number(projects, "completionRate")
        ));
    }
    out
}

fn tasks(data: &Value) -> String {
    let Some(body) = body(data) else {
        return "No task data available".to_string();
    };

    match action(body) {
        Some("create") => {
            if let Some(task) = section(body, "task") {
                return format!(
                    "✅ Task created successfully!\n\n**{}**\nID: {}\nPriority: {}",
                    text(task, "title"),
                    text(task, "id"),
                    text(task, "priority")
                );
            }
        }
        Some("list") => {
            if let Some(tasks) = list(body, "tasks") {
                let mut out = format!("📋 **Your Tasks** ({} total)\n\n", tasks.len());
                for task in tasks.iter().take(5) {
                    let glyph = match task.get("status").and_then(Value::as_str) {
                        Some("completed") => "✅",
                        Some("in-progress") => "🔄",
                        _ => "⏳",
                    };
                    out.push_str(&format!("{} **{}**\n", glyph, text(task, "title")));
                    out.push_str(&format!(
                        "   Priority: {} | Due: {}\n\n",
                        text(task, "priority"),
                        text_or(task, "dueDate", "No deadline")
                    ));
                }
                if let Some(summary) = section(body, "summary") {
                    out.push_str(&format!(
                        "\n📊 Summary: {} pending, {} in progress, {} completed",
                        number(summary, "pending"),
                        number(summary, "inProgress"),
                        number(summary, "completed")
                    ));
                }
                return out;
            }
        }
        _ => {}
    }
    "Task operation completed".to_string()
}

fn support_tickets(data: &Value) -> String {
    let Some(body) = body(data) else {
        return "No ticket data available".to_string();
    };

    match action(body) {
        Some("create") => {
            if let Some(ticket) = section(body, "ticket") {
                return format!(
                    "✅ Support ticket created!\n\n**{}**\nTicket ID: {}\nStatus: {}\nPriority: {}",
                    text(ticket, "subject"),
                    text(ticket, "ticketId"),
                    text(ticket, "status"),
                    text(ticket, "priority")
                );
            }
        }
        Some("list") => {
            if let Some(tickets) = list(body, "tickets") {
                let mut out = format!("🎫 **Your Support Tickets** ({} total)\n\n", tickets.len());
                for ticket in tickets.iter().take(5) {
                    let glyph = match ticket.get("status").and_then(Value::as_str) {
                        Some("resolved") => "✅",
                        Some("in-progress") => "🔄",
                        _ => "🆕",
                    };
                    out.push_str(&format!("{} **{}**\n", glyph, text(ticket, "subject")));
                    out.push_str(&format!(
                        "   ID: {} | Priority: {}\n",
                        text(ticket, "ticketId"),
                        text(ticket, "priority")
                    ));
                    out.push_str(&format!("   Status: {}\n\n", text(ticket, "status")));
                }
                return out;
            }
        }
        _ => {}
    }
    "Ticket operation completed".to_string()
}

fn project_status(data: &Value) -> String {
    let Some(body) = body(data) else {
        return "No project data available".to_string();
    };

    match action(body) {
        Some("get") => {
            if let Some(project) = section(body, "project") {
                let mut out = format!("📁 **Project: {}**\n\n", text(project, "name"));
                out.push_str(&format!("ID: {}\n", text(project, "projectId")));
                out.push_str(&format!("Status: {}\n", text(project, "status")));
                out.push_str(&format!("Progress: {}%\n\n", number(project, "progress")));

                if let Some(budget) = section(project, "budget") {
                    out.push_str(&format!(
                        "💰 Budget: ${} ({}% spent)\n\n",
                        amount(budget, "total"),
                        number(budget, "spent")
                    ));
                }
                if let Some(team) = list(project, "team").filter(|t| !t.is_empty()) {
                    out.push_str("👥 Team:\n");
                    for member in team {
                        out.push_str(&format!(
                            "   - {} ({})\n",
                            text(member, "name"),
                            text(member, "role")
                        ));
                    }
                }
                return out;
            }
        }
        Some("list") => {
            if let Some(projects) = list(body, "projects") {
                let mut out = format!("📁 **Your Projects** ({} total)\n\n", projects.len());
                for project in projects {
                    out.push_str(&format!("**{}**\n", text(project, "name")));
                    out.push_str(&format!(
                        "   ID: {} | Progress: {}%\n\n",
                        text(project, "projectId"),
                        number(project, "progress")
                    ));
                }
                return out;
            }
        }
        _ => {}
    }
    "Project data retrieved".to_string()
}

fn document_search(data: &Value) -> String {
    let Some(body) = body(data) else {
        return "No documents found".to_string();
    };

    let results = list(body, "results");
    let total = match body.get("totalResults") {
        Some(Value::Number(n)) => n.to_string(),
        _ => results.map_or(0, Vec::len).to_string(),
    };

    let mut out = format!(
        "🔍 **Search Results for \"{}\"**\n\n",
        text_or(body, "query", "")
    );
    out.push_str(&format!("Found {} document(s)\n\n", total));
    for (index, doc) in results.into_iter().flatten().take(5).enumerate() {
        out.push_str(&format!("{}. **{}**\n", index + 1, text(doc, "title")));
        out.push_str(&format!(
            "   Type: {} | Category: {}\n",
            text(doc, "type"),
            text(doc, "category")
        ));
        out.push_str(&format!("   📄 {}\n\n", text_or(doc, "excerpt", "")));
    }
    out
}
