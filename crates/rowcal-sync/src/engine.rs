//! The sync engine: top-level coordinator for configuration and feed
//! operations.
//!
//! Each operation is request-scoped and executes against the collaborator
//! traits; there is no shared mutable state in the engine itself. Every
//! collaborator call is bounded by the engine's I/O timeout, and an elapsed
//! timeout surfaces as a retryable error. Within one sync run, source
//! fetches for distinct configurations run in parallel; a failure on one
//! configuration never aborts the others.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use rowcal_core::{
    CalendarConfig, FieldCandidate, FieldRole, candidates_for_role, feed_fingerprint,
};
use rowcal_source::{FieldSelection, SourceDatabase, extract_events};

use crate::error::{SyncError, SyncResult};
use crate::feed::{Feed, FeedOutcome};
use crate::gate;
use crate::store::{ConfigStore, Entitlements};
use crate::submission::ConfigSubmission;

/// Default bound on any single collaborator call.
const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(10);

/// The identity of the requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No valid identity; every operation refuses with an auth error.
    Anonymous,
    /// An authenticated user.
    User(String),
}

impl Caller {
    /// Creates an authenticated caller.
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(id.into())
    }

    fn user_id(&self) -> SyncResult<&str> {
        match self {
            Self::User(id) => Ok(id),
            Self::Anonymous => Err(SyncError::Auth),
        }
    }
}

/// Coordinates source, store, and entitlement collaborators into the four
/// exposed operations: `sync`, `upsert`, `remove`, `promote`.
pub struct SyncEngine {
    store: Arc<dyn ConfigStore>,
    source: Arc<dyn SourceDatabase>,
    entitlements: Arc<dyn Entitlements>,
    io_timeout: Duration,
}

impl SyncEngine {
    /// Creates an engine with the default I/O timeout.
    pub fn new(
        store: Arc<dyn ConfigStore>,
        source: Arc<dyn SourceDatabase>,
        entitlements: Arc<dyn Entitlements>,
    ) -> Self {
        Self {
            store,
            source,
            entitlements,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    /// Builder method to bound collaborator calls with a custom timeout.
    #[must_use]
    pub fn with_io_timeout(mut self, io_timeout: Duration) -> Self {
        self.io_timeout = io_timeout;
        self
    }

    /// Bounds a collaborator call with the engine's I/O timeout.
    async fn bounded<T>(&self, fut: impl Future<Output = T>) -> SyncResult<T> {
        tokio::time::timeout(self.io_timeout, fut)
            .await
            .map_err(|_| SyncError::Timeout {
                timeout_ms: self.io_timeout.as_millis() as u64,
            })
    }

    /// Materializes the caller's active, configured feeds.
    ///
    /// Configurations that are unconfigured or inactive for the caller's
    /// entitlement are skipped. The remaining configurations are synced in
    /// parallel and each reports its own outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Auth`] for anonymous callers, or an upstream
    /// error if the config listing itself fails. Per-configuration failures
    /// are carried inside the returned outcomes instead.
    pub async fn sync(&self, caller: &Caller) -> SyncResult<Vec<FeedOutcome>> {
        let user_id = caller.user_id()?;

        let entitled = self.bounded(self.entitlements.is_entitled(user_id)).await??;
        let configs = self
            .bounded(self.store.list_configs_for_user(user_id))
            .await??;

        let eligible: Vec<_> = configs
            .into_iter()
            .filter(|c| c.is_configured() && gate::is_active(c, entitled))
            .collect();

        debug!(
            user = %user_id,
            entitled,
            eligible = eligible.len(),
            "Syncing eligible configs"
        );

        let outcomes = join_all(eligible.into_iter().map(|config| self.sync_config(config))).await;
        Ok(outcomes)
    }

    async fn sync_config(&self, config: CalendarConfig) -> FeedOutcome {
        let config_id = config.id.clone();
        match self.build_feed(config).await {
            Ok(feed) => FeedOutcome::ok(feed),
            Err(error) => {
                warn!(config_id = %config_id, %error, "Config sync failed");
                FeedOutcome::err(config_id, error)
            }
        }
    }

    async fn build_feed(&self, config: CalendarConfig) -> SyncResult<Feed> {
        let rows = self
            .bounded(self.source.list_rows(&config.source_database_id))
            .await??;

        let selection = FieldSelection::new(
            &config.title_property_id,
            &config.date_property_id,
            &config.description_property_id,
        );
        let events = extract_events(&rows, &selection, &config.reminder_offsets);
        let fingerprint = feed_fingerprint(&events);

        if config.content_hash.as_deref() == Some(fingerprint.as_str()) {
            debug!(config_id = %config.id, "Feed unchanged, reusing cached serialization");
            return Ok(Feed {
                config_id: config.id,
                events,
                fingerprint,
                regenerated: false,
                cached_feed: config.cached_feed,
            });
        }

        // Re-fetch before writing: an edit that landed after the run read
        // this config must not be overwritten by the stale value.
        let fresh = self.bounded(self.store.get_config(&config.id)).await??;
        let mut updated = fresh.unwrap_or(config);
        updated.record_feed(fingerprint.clone(), None);
        let stored = self.bounded(self.store.upsert_config(updated)).await??;

        info!(config_id = %stored.id, events = events.len(), "Feed regenerated");
        Ok(Feed {
            config_id: stored.id,
            events,
            fingerprint,
            regenerated: true,
            cached_feed: None,
        })
    }

    /// Lists the properties of a source database that are eligible for a
    /// calendar field role, for presentation to the operator choosing a
    /// mapping.
    ///
    /// An empty result is valid: the database simply has no candidate for
    /// that role.
    ///
    /// # Errors
    ///
    /// [`SyncError::Auth`] for anonymous callers, or an upstream error if
    /// the schema fetch fails.
    pub async fn field_candidates(
        &self,
        caller: &Caller,
        database_id: &str,
        role: FieldRole,
    ) -> SyncResult<Vec<FieldCandidate>> {
        caller.user_id()?;

        let properties = self
            .bounded(self.source.list_properties(database_id))
            .await??;
        Ok(candidates_for_role(&properties, role))
    }

    /// Creates or replaces the caller's configuration for a source database.
    ///
    /// With a `config_id`, the target must exist and belong to the caller;
    /// without one, an existing configuration for the same database is
    /// updated. Either way each (owner, database) pair keeps a single
    /// configuration: an edit may not retarget onto a database another of
    /// the caller's configurations already maps. Reminder rules are replaced
    /// wholesale and the published-feed state is invalidated so the next
    /// sync regenerates.
    ///
    /// # Errors
    ///
    /// [`SyncError::Auth`] for anonymous callers, [`SyncError::Validation`]
    /// for malformed submissions or an edit that would leave two
    /// configurations mapping the same database, [`SyncError::NotFound`]
    /// when the targeted configuration belongs to someone else.
    pub async fn upsert(
        &self,
        caller: &Caller,
        submission: &ConfigSubmission,
    ) -> SyncResult<CalendarConfig> {
        let user_id = caller.user_id()?;
        let offsets = submission.validate()?;

        let existing = match &submission.config_id {
            Some(id) => {
                let found = self.bounded(self.store.get_config(id)).await??;
                if let Some(ref config) = found
                    && config.owner_id != user_id
                {
                    return Err(SyncError::NotFound);
                }
                if let Some(ref config) = found
                    && config.source_database_id != submission.database_id
                {
                    let clash = self
                        .bounded(self.store.list_configs_for_user(user_id))
                        .await??
                        .into_iter()
                        .any(|c| {
                            c.id != config.id
                                && c.source_database_id == submission.database_id
                        });
                    if clash {
                        return Err(SyncError::validation(
                            "database_id",
                            "another configuration already maps this database",
                        ));
                    }
                }
                found
            }
            None => self
                .bounded(self.store.list_configs_for_user(user_id))
                .await??
                .into_iter()
                .find(|c| c.source_database_id == submission.database_id),
        };

        let (id, is_primary) = match existing {
            Some(config) => (config.id, config.is_primary),
            None => (Uuid::new_v4().to_string(), false),
        };

        let config = CalendarConfig::new(id, user_id, &submission.database_id)
            .with_fields(
                &submission.title_property_id,
                &submission.date_property_id,
                &submission.description_property_id,
            )
            .with_reminders(offsets)
            .with_primary(is_primary);

        let stored = self.bounded(self.store.upsert_config(config)).await??;
        info!(config_id = %stored.id, user = %user_id, "Config upserted");
        Ok(stored)
    }

    /// Deletes the caller's configuration, cascading its reminders.
    ///
    /// # Errors
    ///
    /// [`SyncError::NotFound`] if the configuration does not exist or is not
    /// owned by the caller; the two cases are indistinguishable so the
    /// operation leaks no existence information.
    pub async fn remove(&self, caller: &Caller, config_id: &str) -> SyncResult<()> {
        let user_id = caller.user_id()?;

        let existing = self.bounded(self.store.get_config(config_id)).await??;
        match existing {
            Some(config) if config.owner_id == user_id => {}
            _ => return Err(SyncError::NotFound),
        }

        if !self.bounded(self.store.delete_config(config_id)).await?? {
            return Err(SyncError::NotFound);
        }

        info!(config_id = %config_id, user = %user_id, "Config removed");
        Ok(())
    }

    /// Designates the caller's primary configuration.
    ///
    /// Delegates to the store's transactional `set_primary`, which clears
    /// every other flag of the same user atomically. For entitled callers
    /// this does not change which feeds are active, but the flag is still
    /// recorded so a later downgrade keeps the chosen primary.
    ///
    /// # Errors
    ///
    /// [`SyncError::NotFound`] if the configuration does not exist or is not
    /// owned by the caller.
    pub async fn promote(&self, caller: &Caller, config_id: &str) -> SyncResult<()> {
        let user_id = caller.user_id()?;

        if !self
            .bounded(self.store.set_primary(user_id, config_id))
            .await??
        {
            return Err(SyncError::NotFound);
        }

        info!(config_id = %config_id, user = %user_id, "Config promoted to primary");
        Ok(())
    }
}
