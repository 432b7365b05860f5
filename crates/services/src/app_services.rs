use std::sync::Arc;

use checklist_core::model::ChecklistDraft;
use storage::repository::{Storage, StorageKey};

use crate::checklist_service::ChecklistService;
use crate::error::AppServicesError;

/// Assembles app-facing services from a checklist definition and storage.
#[derive(Clone)]
pub struct AppServices {
    title: String,
    checklist: Arc<ChecklistService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the definition is invalid or storage
    /// initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        draft: ChecklistDraft,
        key: StorageKey,
    ) -> Result<Self, AppServicesError> {
        // Validate before touching the database so a bad file fails fast.
        let checklist = draft.validate()?;
        let storage = Storage::sqlite(db_url).await?;
        let title = checklist.title().to_owned();
        let service = ChecklistService::open(checklist, storage.progress, key).await;
        Ok(Self {
            title,
            checklist: Arc::new(service),
        })
    }

    /// Build services over an existing storage bundle.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Checklist` if the definition is invalid.
    pub async fn from_storage(
        storage: &Storage,
        draft: ChecklistDraft,
        key: StorageKey,
    ) -> Result<Self, AppServicesError> {
        let checklist = draft.validate()?;
        let title = checklist.title().to_owned();
        let service = ChecklistService::open(checklist, Arc::clone(&storage.progress), key).await;
        Ok(Self {
            title,
            checklist: Arc::new(service),
        })
    }

    /// Build services backed by in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Checklist` if the definition is invalid.
    pub async fn in_memory(draft: ChecklistDraft) -> Result<Self, AppServicesError> {
        Self::from_storage(&Storage::in_memory(), draft, StorageKey::default()).await
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn checklist(&self) -> Arc<ChecklistService> {
        Arc::clone(&self.checklist)
    }
}
