//! Feed output types produced by a sync run.

use serde::{Deserialize, Serialize};

use rowcal_core::CalendarEvent;

use crate::error::SyncError;

/// The materialized feed of one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    /// The configuration this feed belongs to.
    pub config_id: String,
    /// Events in source-row order.
    pub events: Vec<CalendarEvent>,
    /// Content fingerprint of `events`.
    pub fingerprint: String,
    /// False when the fingerprint matched the stored hash and the published
    /// feed is still current; the serialization layer reuses `cached_feed`
    /// in that case instead of reserializing.
    pub regenerated: bool,
    /// The previously cached serialized feed, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_feed: Option<String>,
}

/// Per-configuration result of one sync run.
///
/// A failure fetching one configuration's rows never aborts the others;
/// each carries its own outcome.
#[derive(Debug)]
pub struct FeedOutcome {
    /// The configuration this outcome belongs to.
    pub config_id: String,
    /// The feed, or why this configuration failed.
    pub result: Result<Feed, SyncError>,
}

impl FeedOutcome {
    /// Creates a successful outcome.
    pub fn ok(feed: Feed) -> Self {
        Self {
            config_id: feed.config_id.clone(),
            result: Ok(feed),
        }
    }

    /// Creates a failed outcome.
    pub fn err(config_id: impl Into<String>, error: SyncError) -> Self {
        Self {
            config_id: config_id.into(),
            result: Err(error),
        }
    }
}
