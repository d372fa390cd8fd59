//! SourceDatabase trait definition.
//!
//! The [`SourceDatabase`] trait is the boundary to the external structured
//! data source. The core only ever reads from it: the property schema of a
//! database and the current rows. Implementations own authentication,
//! pagination, and rate limiting.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use rowcal_core::SourceProperty;

use crate::error::{SourceError, SourceResult};
use crate::row::RawRow;

/// A boxed future for object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only access to a source database.
///
/// Implementations should be `Send + Sync` so one client can serve
/// concurrent sync runs. Errors are classified by [`SourceError`]; callers
/// decide retry policy from [`SourceError::is_retryable`].
pub trait SourceDatabase: Send + Sync {
    /// Lists the property schema of a database.
    fn list_properties(&self, database_id: &str)
    -> BoxFuture<'_, SourceResult<Vec<SourceProperty>>>;

    /// Lists the current rows of a database.
    ///
    /// Row order is the source's order and is preserved downstream, feed
    /// fingerprints included.
    fn list_rows(&self, database_id: &str) -> BoxFuture<'_, SourceResult<Vec<RawRow>>>;
}

/// An in-memory source backed by static data.
///
/// Useful for tests and fixtures; unknown database ids report
/// [`SourceError::NotFound`] just like a real source would for an unshared
/// database.
#[derive(Debug, Default)]
pub struct StaticSource {
    databases: HashMap<String, (Vec<SourceProperty>, Vec<RawRow>)>,
}

impl StaticSource {
    /// Creates an empty static source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a database with its schema and rows.
    pub fn with_database(
        mut self,
        database_id: impl Into<String>,
        properties: Vec<SourceProperty>,
        rows: Vec<RawRow>,
    ) -> Self {
        self.databases
            .insert(database_id.into(), (properties, rows));
        self
    }
}

impl SourceDatabase for StaticSource {
    fn list_properties(
        &self,
        database_id: &str,
    ) -> BoxFuture<'_, SourceResult<Vec<SourceProperty>>> {
        let result = self
            .databases
            .get(database_id)
            .map(|(properties, _)| properties.clone())
            .ok_or_else(|| SourceError::not_found(format!("database {database_id}")));
        Box::pin(async move { result })
    }

    fn list_rows(&self, database_id: &str) -> BoxFuture<'_, SourceResult<Vec<RawRow>>> {
        let result = self
            .databases
            .get(database_id)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| SourceError::not_found(format!("database {database_id}")));
        Box::pin(async move { result })
    }
}
