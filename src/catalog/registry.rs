// ABOUTME: Implements the Catalog - the read-only table of workflow
// ABOUTME: definitions keyed by function name and by workflow id.

use std::collections::HashMap;

use super::{Role, WorkflowDefinition, builtin};
use crate::error::CatalogError;

/// Immutable set of workflow definitions, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<WorkflowDefinition>,
    by_function: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, failing if any function name or workflow id repeats
    /// or if a workflow is reachable by no role.
    pub fn new(entries: Vec<WorkflowDefinition>) -> Result<Self, CatalogError> {
        let mut by_function = HashMap::with_capacity(entries.len());
        let mut by_id = HashMap::with_capacity(entries.len());

        for (index, def) in entries.iter().enumerate() {
            if by_function.insert(def.function_name.clone(), index).is_some() {
                return Err(CatalogError::DuplicateFunction(def.function_name.clone()));
            }
            if by_id.insert(def.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateWorkflow(def.id.clone()));
            }
            if def.allowed_roles.is_empty() {
                return Err(CatalogError::NoAllowedRoles(def.id.clone()));
            }
        }

        Ok(Self {
            entries,
            by_function,
            by_id,
        })
    }

    /// The standard catalog of automation workflows.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin::definitions())
    }

    /// Look up a definition by its advertised function name.
    pub fn lookup(&self, function_name: &str) -> Option<&WorkflowDefinition> {
        self.by_function
            .get(function_name)
            .map(|&index| &self.entries[index])
    }

    /// Look up a definition by workflow id.
    pub fn by_workflow_id(&self, workflow_id: &str) -> Option<&WorkflowDefinition> {
        self.by_id.get(workflow_id).map(|&index| &self.entries[index])
    }

    /// All definitions in declaration order.
    pub fn entries(&self) -> &[WorkflowDefinition] {
        &self.entries
    }

    /// Definitions a role is allowed to use, in declaration order.
    pub fn entries_for(&self, role: Role) -> impl Iterator<Item = &WorkflowDefinition> {
        self.entries.iter().filter(move |def| def.allows(role))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
