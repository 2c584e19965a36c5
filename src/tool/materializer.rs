// ABOUTME: Materializer - turns an entitlement's workflow grants into tool
// ABOUTME: descriptors and caches the result per (role, grant list).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::ToolDescriptor;
use crate::catalog::{Catalog, Role};
use crate::profile::WorkflowGrant;

/// Cache key. Two identities share an entry only if both their role and
/// their exact grant list match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    role: Role,
    grants: Vec<WorkflowGrant>,
}

/// Produces and caches tool descriptors. Cloning shares the cache.
#[derive(Clone)]
pub struct Materializer {
    catalog: Arc<Catalog>,
    cache: Arc<RwLock<HashMap<CacheKey, Arc<[ToolDescriptor]>>>>,
}

impl Materializer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cache: Arc::default(),
        }
    }

    /// Resolve grants against the catalog without touching the cache.
    ///
    /// Output follows grant order. Unknown workflow ids and workflows that
    /// do not allow `role` are skipped with a warning.
    pub fn materialize(&self, role: Role, grants: &[WorkflowGrant]) -> Vec<ToolDescriptor> {
        let mut tools: Vec<ToolDescriptor> = Vec::with_capacity(grants.len());

        for grant in grants {
            let Some(def) = self.catalog.by_workflow_id(&grant.workflow_id) else {
                warn!(%role, workflow = %grant.workflow_id, "workflow definition not found");
                continue;
            };
            if !def.allows(role) {
                warn!(%role, workflow = %grant.workflow_id, "role not allowed for workflow");
                continue;
            }
            if tools.iter().any(|t| t.name == def.function_name) {
                debug!(%role, workflow = %grant.workflow_id, "duplicate grant ignored");
                continue;
            }

            debug!(%role, tool = %def.function_name, "added tool");
            tools.push(ToolDescriptor::from_definition(def, grant));
        }

        tools
    }

    /// Cached form of [`materialize`](Self::materialize).
    ///
    /// Concurrent first requests may both compute; the result is identical.
    pub async fn tools_for(&self, role: Role, grants: &[WorkflowGrant]) -> Arc<[ToolDescriptor]> {
        let key = CacheKey {
            role,
            grants: grants.to_vec(),
        };
        if let Some(tools) = self.cache.read().await.get(&key) {
            debug!(%role, count = tools.len(), "returning cached tools");
            return Arc::clone(tools);
        }

        let tools: Arc<[ToolDescriptor]> = self.materialize(role, grants).into();
        info!(%role, count = tools.len(), "materialized tools");
        self.cache.write().await.insert(key, Arc::clone(&tools));
        tools
    }

    /// Drop every cached descriptor list.
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        let dropped = cache.len();
        cache.clear();
        info!(dropped, "tool cache cleared");
    }

    /// Number of cached descriptor lists.
    pub async fn cached_entries(&self) -> usize {
        self.cache.read().await.len()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}
