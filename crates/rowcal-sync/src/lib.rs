//! Sync orchestration: config store and entitlement seams, the activation
//! gate, and the feed engine.

pub mod engine;
pub mod error;
pub mod feed;
pub mod gate;
pub mod store;
pub mod submission;

pub use engine::{Caller, SyncEngine};
pub use error::{StoreError, SyncError, SyncResult};
pub use feed::{Feed, FeedOutcome};
pub use gate::is_active;
pub use store::{ConfigStore, Entitlements, MemoryStore, StaticEntitlements, StoreResult};
pub use submission::ConfigSubmission;
