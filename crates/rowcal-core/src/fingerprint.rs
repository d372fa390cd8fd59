//! Feed content fingerprinting.
//!
//! A feed's fingerprint is a SHA-256 digest over a canonical serialization of
//! every event field in feed order. Two element-wise identical event lists
//! always hash the same; any difference in any field, reminder list, or
//! ordering produces a different digest. The sync engine compares this
//! against the stored hash to decide whether a published feed must be
//! regenerated.

use sha2::{Digest, Sha256};

use crate::event::{CalendarEvent, EventStart};

/// Computes the fingerprint of an ordered event list as a lowercase hex string.
///
/// Deterministic and order-sensitive: the encoding length-frames every field
/// so that adjacent values can never collide by concatenation.
pub fn feed_fingerprint(events: &[CalendarEvent]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((events.len() as u64).to_le_bytes());

    for event in events {
        frame(&mut hasher, b'T', event.title.as_bytes());
        match &event.start {
            EventStart::DateTime(dt) => {
                frame(&mut hasher, b'S', dt.to_rfc3339().as_bytes());
            }
            EventStart::Day(date) => {
                frame(&mut hasher, b'D', date.to_string().as_bytes());
            }
        }
        match &event.description {
            Some(description) => frame(&mut hasher, b'E', description.as_bytes()),
            None => frame(&mut hasher, b'N', b""),
        }
        hasher.update((event.reminders.len() as u64).to_le_bytes());
        for reminder in &event.reminders {
            hasher.update(reminder.minutes_before.to_le_bytes());
        }
    }

    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

fn frame(hasher: &mut Sha256, tag: u8, bytes: &[u8]) {
    hasher.update([tag]);
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
