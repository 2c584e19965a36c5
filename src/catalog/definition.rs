// ABOUTME: Defines roles and WorkflowDefinition - the immutable catalog
// ABOUTME: entry describing one externally hosted workflow function.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParameterSchema;
use crate::error::UnknownRole;

/// Role tag attached to every identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Ceo,
    Employee,
    Customer,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Ceo, Role::Employee, Role::Customer, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Ceo => "ceo",
            Role::Employee => "employee",
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// A workflow exposed as a callable function.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowDefinition {
    /// Stable workflow id referenced by profile grants.
    pub id: String,

    /// Function name advertised to the agent. Unique across the catalog.
    pub function_name: String,

    pub description: String,

    pub parameters: ParameterSchema,

    /// Path appended to the engine base URL.
    pub endpoint: String,

    pub allowed_roles: Vec<Role>,

    /// Sample user phrases. Documentation only.
    pub examples: Vec<String>,
}

impl WorkflowDefinition {
    /// Start a definition with its identifying fields.
    pub fn new(
        id: impl Into<String>,
        function_name: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            function_name: function_name.into(),
            description: String::new(),
            parameters: ParameterSchema::new(),
            endpoint: endpoint.into(),
            allowed_roles: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn parameters(mut self, parameters: ParameterSchema) -> Self {
        self.parameters = parameters;
        self
    }

    /// Grant a role access to this workflow.
    pub fn allow(mut self, role: Role) -> Self {
        if !self.allowed_roles.contains(&role) {
            self.allowed_roles.push(role);
        }
        self
    }

    pub fn examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether a role may see and invoke this workflow.
    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}
