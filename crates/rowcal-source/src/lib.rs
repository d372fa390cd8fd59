//! Source-database boundary: the SourceDatabase trait, raw row data, and
//! row-to-event field extraction.

pub mod client;
pub mod error;
pub mod extract;
pub mod row;

pub use client::{BoxFuture, SourceDatabase, StaticSource};
pub use error::{SourceError, SourceResult};
pub use extract::{FieldSelection, extract_event, extract_events};
pub use row::{RawRow, RawValue};
