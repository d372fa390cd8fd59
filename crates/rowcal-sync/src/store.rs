//! Persistence and entitlement collaborator interfaces.
//!
//! [`ConfigStore`] is the seam to the persistent storage engine. Each method
//! is one logical transaction: configs are written whole (never a partial
//! field set) and [`set_primary`](ConfigStore::set_primary) performs its
//! clear-all-then-set step atomically, which is what upholds the
//! single-primary invariant under concurrent promotions.
//!
//! [`MemoryStore`] is the in-process reference implementation used by tests
//! and small deployments; a single async mutex around the map gives every
//! method the required transaction boundary.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::debug;

use rowcal_core::CalendarConfig;
use rowcal_source::BoxFuture;

use crate::error::StoreError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Transactional persistence for calendar configurations.
pub trait ConfigStore: Send + Sync {
    /// Fetches a configuration by id.
    fn get_config(&self, id: &str) -> BoxFuture<'_, StoreResult<Option<CalendarConfig>>>;

    /// Lists all configurations owned by a user.
    fn list_configs_for_user(
        &self,
        user_id: &str,
    ) -> BoxFuture<'_, StoreResult<Vec<CalendarConfig>>>;

    /// Creates or replaces a configuration, keyed on its id.
    ///
    /// The whole value is written in one transaction; reminder offsets are
    /// part of the value, so prior reminders are replaced, never merged.
    fn upsert_config(&self, config: CalendarConfig) -> BoxFuture<'_, StoreResult<CalendarConfig>>;

    /// Deletes a configuration. Returns false if the id was absent.
    ///
    /// Reminder offsets live inside the config value, so deletion cascades
    /// them structurally.
    fn delete_config(&self, id: &str) -> BoxFuture<'_, StoreResult<bool>>;

    /// Atomically clears the primary flag on all of the user's configs and
    /// sets it on the target.
    ///
    /// Returns false if the target does not exist or is not owned by the
    /// user, in which case nothing is modified.
    fn set_primary(&self, user_id: &str, config_id: &str) -> BoxFuture<'_, StoreResult<bool>>;
}

/// The entitlement collaborator: whether a user's plan permits multiple
/// simultaneously active feeds.
pub trait Entitlements: Send + Sync {
    /// Returns true if the user holds an entitled (paid) plan.
    fn is_entitled(&self, user_id: &str) -> BoxFuture<'_, StoreResult<bool>>;
}

/// In-memory [`ConfigStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    configs: Mutex<HashMap<String, CalendarConfig>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn get_config(&self, id: &str) -> BoxFuture<'_, StoreResult<Option<CalendarConfig>>> {
        let id = id.to_string();
        Box::pin(async move {
            let configs = self.configs.lock().await;
            Ok(configs.get(&id).cloned())
        })
    }

    fn list_configs_for_user(
        &self,
        user_id: &str,
    ) -> BoxFuture<'_, StoreResult<Vec<CalendarConfig>>> {
        let user_id = user_id.to_string();
        Box::pin(async move {
            let configs = self.configs.lock().await;
            let mut owned: Vec<_> = configs
                .values()
                .filter(|c| c.owner_id == user_id)
                .cloned()
                .collect();
            // Stable listing order regardless of map iteration.
            owned.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(owned)
        })
    }

    fn upsert_config(&self, config: CalendarConfig) -> BoxFuture<'_, StoreResult<CalendarConfig>> {
        Box::pin(async move {
            let mut configs = self.configs.lock().await;
            debug!(config_id = %config.id, owner = %config.owner_id, "Upserting config");
            configs.insert(config.id.clone(), config.clone());
            Ok(config)
        })
    }

    fn delete_config(&self, id: &str) -> BoxFuture<'_, StoreResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut configs = self.configs.lock().await;
            let removed = configs.remove(&id).is_some();
            if removed {
                debug!(config_id = %id, "Deleted config");
            }
            Ok(removed)
        })
    }

    fn set_primary(&self, user_id: &str, config_id: &str) -> BoxFuture<'_, StoreResult<bool>> {
        let user_id = user_id.to_string();
        let config_id = config_id.to_string();
        Box::pin(async move {
            let mut configs = self.configs.lock().await;

            let owned = configs
                .get(&config_id)
                .is_some_and(|c| c.owner_id == user_id);
            if !owned {
                return Ok(false);
            }

            for config in configs.values_mut() {
                if config.owner_id == user_id {
                    config.is_primary = config.id == config_id;
                }
            }
            debug!(config_id = %config_id, owner = %user_id, "Promoted config to primary");
            Ok(true)
        })
    }
}

/// Entitlements backed by a static user set; for tests and fixtures.
#[derive(Debug, Default)]
pub struct StaticEntitlements {
    entitled: std::collections::HashSet<String>,
}

impl StaticEntitlements {
    /// Creates an entitlement set with no entitled users.
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder method to mark a user as entitled.
    pub fn with_entitled(mut self, user_id: impl Into<String>) -> Self {
        self.entitled.insert(user_id.into());
        self
    }
}

impl Entitlements for StaticEntitlements {
    fn is_entitled(&self, user_id: &str) -> BoxFuture<'_, StoreResult<bool>> {
        let entitled = self.entitled.contains(user_id);
        Box::pin(async move { Ok(entitled) })
    }
}
