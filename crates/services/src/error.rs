//! Shared error types for the services crate.

use thiserror::Error;

use checklist_core::TrackerError;
use checklist_core::model::ChecklistError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ChecklistService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChecklistServiceError {
    /// Unknown id; nothing was changed.
    #[error(transparent)]
    NotFound(#[from] TrackerError),
    /// The change was applied in memory but could not be saved.
    #[error("progress could not be saved: {0}")]
    PersistenceUnavailable(#[source] StorageError),
}

impl ChecklistServiceError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    #[must_use]
    pub fn is_persistence_unavailable(&self) -> bool {
        matches!(self, Self::PersistenceUnavailable(_))
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Checklist(#[from] ChecklistError),
}
