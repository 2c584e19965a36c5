// ABOUTME: The built-in workflow definitions for executive, operational
// ABOUTME: and general modules served by the automation engine.

use super::{ParamSpec, ParameterSchema, Role, WorkflowDefinition};

const PRIORITIES: [&str; 4] = ["low", "medium", "high", "urgent"];

/// Standard workflows, in catalog order.
pub fn definitions() -> Vec<WorkflowDefinition> {
    vec![
        financial_analytics(),
        company_metrics(),
        task_management(),
        support_ticket(),
        project_status(),
        document_search(),
    ]
}

fn financial_analytics() -> WorkflowDefinition {
    WorkflowDefinition::new(
        "wf_financial_analytics",
        "get_financial_analytics",
        "/webhook/librechat/financial-analytics",
    )
    .description(
        "Get comprehensive financial analytics including revenue, expenses, profit, \
         department performance, and trends. Use this when user asks about financial data, \
         revenue, profit, expenses, or financial metrics.",
    )
    .parameters(
        ParameterSchema::new()
            .required_field(
                "period",
                ParamSpec::string(
                    "Time period for analytics (e.g., \"Q4 2024\", \"2024\", \"Last Quarter\", \"This Year\")",
                )
                .default_value("Q4 2024"),
            )
            .field(
                "includeComparison",
                ParamSpec::boolean("Include comparison with previous period").default_value(true),
            )
            .field(
                "department",
                ParamSpec::string(
                    "Specific department to analyze (optional). Leave empty for all departments.",
                )
                .one_of(["Sales", "Marketing", "Engineering", "Operations", "all"]),
            ),
    )
    .allow(Role::Ceo)
    .examples([
        "Show me Q4 2024 financials",
        "What is our revenue this quarter?",
        "How much profit did we make?",
        "Compare sales performance",
    ])
}

fn company_metrics() -> WorkflowDefinition {
    WorkflowDefinition::new(
        "wf_company_metrics",
        "get_company_metrics",
        "/webhook/librechat/company-metrics",
    )
    .description(
        "Get company-wide KPIs and metrics including employee count, customer satisfaction, \
         active projects, department performance, and goal progress. Use this when user asks \
         about company performance, KPIs, metrics, or overall company status.",
    )
    .parameters(
        ParameterSchema::new()
            .field(
                "metricType",
                ParamSpec::string("Type of metrics to retrieve")
                    .one_of(["all", "employees", "customers", "projects", "departments", "goals"])
                    .default_value("all"),
            )
            .field(
                "includeHistory",
                ParamSpec::boolean("Include historical trend data").default_value(false),
            ),
    )
    .allow(Role::Ceo)
    .examples([
        "Show me company metrics",
        "How many employees do we have?",
        "What is our customer satisfaction score?",
        "How many active projects?",
    ])
}

fn task_management() -> WorkflowDefinition {
    WorkflowDefinition::new(
        "wf_task_management",
        "manage_tasks",
        "/webhook/librechat/task-management",
    )
    .description(
        "Manage tasks including listing, creating, updating, and completing tasks. Use this \
         when user wants to view tasks, create new tasks, update task status, or mark tasks \
         as complete.",
    )
    .parameters(
        ParameterSchema::new()
            .required_field(
                "action",
                ParamSpec::string("Action to perform on tasks")
                    .one_of(["list", "create", "update", "complete"])
                    .default_value("list"),
            )
            .field(
                "status",
                ParamSpec::string("Filter tasks by status (for list action)")
                    .one_of(["pending", "in-progress", "completed", "all"]),
            )
            .field(
                "taskTitle",
                ParamSpec::string("Task title (for create/update actions)"),
            )
            .field(
                "taskDescription",
                ParamSpec::string("Task description (for create action)"),
            )
            .field(
                "priority",
                ParamSpec::string("Task priority (for create action)")
                    .one_of(PRIORITIES)
                    .default_value("medium"),
            )
            .field(
                "taskId",
                ParamSpec::string("Task ID (for update/complete actions)"),
            ),
    )
    .allow(Role::Employee)
    .examples([
        "Show me my tasks",
        "Create a task to review Q4 reports",
        "Mark task as complete",
        "List pending tasks",
    ])
}

fn support_ticket() -> WorkflowDefinition {
    WorkflowDefinition::new(
        "wf_support_ticket",
        "manage_support_tickets",
        "/webhook/librechat/support-ticket",
    )
    .description(
        "Manage support tickets including creating new tickets, viewing ticket status, and \
         listing all tickets. Use this when customer wants to report an issue, check ticket \
         status, or view their support history.",
    )
    .parameters(
        ParameterSchema::new()
            .required_field(
                "action",
                ParamSpec::string("Action to perform")
                    .one_of(["create", "list", "get_status"])
                    .default_value("list"),
            )
            .field("subject", ParamSpec::string("Ticket subject (for create action)"))
            .field(
                "description",
                ParamSpec::string(
                    "Detailed description of the issue (for create action). Minimum 10 characters.",
                ),
            )
            .field(
                "priority",
                ParamSpec::string("Issue priority (for create action)")
                    .one_of(PRIORITIES)
                    .default_value("medium"),
            )
            .field(
                "ticketId",
                ParamSpec::string("Ticket ID (for get_status action)"),
            ),
    )
    .allow(Role::Customer)
    .examples([
        "I need help with login issues",
        "Create a support ticket for billing",
        "Check my ticket status",
        "List my support tickets",
    ])
}

fn project_status() -> WorkflowDefinition {
    WorkflowDefinition::new(
        "wf_project_status",
        "get_project_status",
        "/webhook/librechat/project-status",
    )
    .description(
        "Get project status, progress, budget, timeline, and team information. Use this when \
         customer asks about their project progress, budget status, milestones, or team members.",
    )
    .parameters(
        ParameterSchema::new()
            .required_field(
                "action",
                ParamSpec::string("Action to perform")
                    .one_of(["get", "list"])
                    .default_value("list"),
            )
            .field(
                "projectId",
                ParamSpec::string("Project ID (for get action). Examples: PRJ-001, PRJ-002"),
            ),
    )
    .allow(Role::Customer)
    .examples([
        "Show me my project status",
        "What is the progress of PRJ-001?",
        "List all my projects",
        "How is my project doing?",
    ])
}

fn document_search() -> WorkflowDefinition {
    WorkflowDefinition::new(
        "wf_doc_search",
        "search_documents",
        "/webhook/librechat/document-search",
    )
    .description(
        "Search company documents and knowledge base. Use this when user wants to find \
         documents, search for information, or access company resources.",
    )
    .parameters(
        ParameterSchema::new()
            .required_field("query", ParamSpec::string("Search query or keywords"))
            .field(
                "documentType",
                ParamSpec::string("Filter by document type")
                    .one_of(["all", "pdf", "doc", "txt", "xlsx"])
                    .default_value("all"),
            )
            .field(
                "category",
                ParamSpec::string("Document category")
                    .one_of(["all", "policies", "procedures", "reports", "templates", "guides"])
                    .default_value("all"),
            )
            .field(
                "limit",
                ParamSpec::number("Maximum number of results").default_value(10),
            ),
    )
    .allow(Role::Ceo)
    .allow(Role::Employee)
    .allow(Role::Customer)
    .examples([
        "Search for employee handbook",
        "Find Q4 reports",
        "Look for onboarding documents",
        "Search policies",
    ])
}
