//! Entitlement gate: which configurations produce an active feed.
//!
//! An entitled user's configurations are all active. A non-entitled user has
//! at most one active configuration, the one flagged primary; with no flag
//! set, none is active. The flag itself is maintained by the store's
//! transactional `set_primary` and is recorded even for entitled users so a
//! later downgrade keeps the user's chosen primary.

use rowcal_core::CalendarConfig;

/// Returns true if the configuration's feed is active for a user with the
/// given entitlement.
pub fn is_active(config: &CalendarConfig, entitled: bool) -> bool {
    entitled || config.is_primary
}
