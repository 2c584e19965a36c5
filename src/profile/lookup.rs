// ABOUTME: Defines the ProfileLookup trait for resolving identities to
// ABOUTME: entitlements, plus an in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use super::ProfileEntitlement;

/// Source of profile entitlements, keyed by identity id.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    /// Return the entitlement for an identity, or `None` if it has no profile.
    async fn find_entitlement(
        &self,
        identity_id: &str,
    ) -> Result<Option<ProfileEntitlement>, anyhow::Error>;
}

/// Profiles held in memory. Cloning shares the underlying map.
#[derive(Default, Clone)]
pub struct InMemoryProfiles {
    profiles: Arc<RwLock<HashMap<String, ProfileEntitlement>>>,
}

impl InMemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert) for synchronous setup.
    ///
    /// Meant for use before the map is shared. A sole handle inserts without
    /// locking. A shared handle takes the write lock if it is free; if another
    /// task holds the lock the profile is not added and a warning is logged,
    /// so use [`insert`](Self::insert) once the map is in use.
    pub fn with_profile(
        mut self,
        identity_id: impl Into<String>,
        profile: ProfileEntitlement,
    ) -> Self {
        let identity_id = identity_id.into();
        if let Some(lock) = Arc::get_mut(&mut self.profiles) {
            lock.get_mut().insert(identity_id, profile);
            return self;
        }

        match self.profiles.try_write() {
            Ok(mut profiles) => {
                profiles.insert(identity_id, profile);
            }
            Err(_) => {
                warn!(identity = %identity_id, "profile map locked, builder insert skipped");
            }
        }
        self
    }

    /// Insert or replace an identity's profile.
    pub async fn insert(&self, identity_id: impl Into<String>, profile: ProfileEntitlement) {
        self.profiles
            .write()
            .await
            .insert(identity_id.into(), profile);
    }

    /// Remove an identity's profile.
    pub async fn remove(&self, identity_id: &str) -> Option<ProfileEntitlement> {
        self.profiles.write().await.remove(identity_id)
    }

    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl ProfileLookup for InMemoryProfiles {
    async fn find_entitlement(
        &self,
        identity_id: &str,
    ) -> Result<Option<ProfileEntitlement>, anyhow::Error> {
        Ok(self.profiles.read().await.get(identity_id).cloned())
    }
}
