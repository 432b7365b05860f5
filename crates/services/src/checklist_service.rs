use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use checklist_core::Tracker;
use checklist_core::model::{
    Checklist, ChecklistSnapshot, ItemId, MasterItemId, OverallProgress, SectionId,
    SectionProgress,
};
use storage::repository::{ProgressRepository, StorageKey};
use storage::{decode_flags, encode_flags};

use crate::error::ChecklistServiceError;

/// Applies user intents to a tracker and keeps the stored flag map in step.
///
/// Every intent holds the tracker lock for its whole
/// validate → mutate → recompute → persist cycle, so two intents never
/// interleave and stores land in the order the intents were issued.
pub struct ChecklistService {
    tracker: Mutex<Tracker>,
    repo: Arc<dyn ProgressRepository>,
    key: StorageKey,
}

impl ChecklistService {
    /// Build the tracker and apply stored progress once.
    ///
    /// A failing repository or an unreadable blob is not fatal: the tracker
    /// starts with every item unchecked.
    pub async fn open(
        checklist: Checklist,
        repo: Arc<dyn ProgressRepository>,
        key: StorageKey,
    ) -> Self {
        let mut tracker = Tracker::new(checklist);

        match repo.load(&key).await {
            Ok(Some(blob)) => match decode_flags(&blob) {
                Some(flags) => {
                    let applied = tracker.apply_flag_map(&flags);
                    debug!(key = %key, applied, "restored progress");
                }
                None => warn!(key = %key, "ignoring malformed progress blob"),
            },
            Ok(None) => debug!(key = %key, "no stored progress"),
            Err(err) => warn!(key = %key, error = %err, "progress store unavailable, starting fresh"),
        }

        Self {
            tracker: Mutex::new(tracker),
            repo,
            key,
        }
    }

    #[must_use]
    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    /// # Errors
    ///
    /// Returns `ChecklistServiceError::NotFound` for unknown ids (no change).
    /// Returns `ChecklistServiceError::PersistenceUnavailable` if the new
    /// state was applied but could not be stored.
    pub async fn set_item_done(&self, id: &ItemId, value: bool) -> Result<(), ChecklistServiceError> {
        let mut tracker = self.tracker.lock().await;
        tracker.set_item_done(id, value)?;
        debug!(item = %id, value, "item updated");
        self.persist(&tracker).await
    }

    /// # Errors
    ///
    /// Same contract as [`ChecklistService::set_item_done`].
    pub async fn set_section_done(
        &self,
        id: &SectionId,
        value: bool,
    ) -> Result<(), ChecklistServiceError> {
        let mut tracker = self.tracker.lock().await;
        tracker.set_section_done(id, value)?;
        debug!(section = %id, value, "section updated");
        self.persist(&tracker).await
    }

    /// # Errors
    ///
    /// Same contract as [`ChecklistService::set_item_done`].
    pub async fn set_master_done(
        &self,
        id: &MasterItemId,
        value: bool,
    ) -> Result<(), ChecklistServiceError> {
        let mut tracker = self.tracker.lock().await;
        tracker.set_master_done(id, value)?;
        debug!(master = %id, value, "master item cascaded");
        self.persist(&tracker).await
    }

    /// Uncheck everything and delete the stored blob.
    ///
    /// Callers are expected to have confirmed with the user already.
    ///
    /// # Errors
    ///
    /// Returns `ChecklistServiceError::PersistenceUnavailable` if the blob
    /// could not be deleted. The in-memory reset still happened.
    pub async fn reset(&self) -> Result<(), ChecklistServiceError> {
        let mut tracker = self.tracker.lock().await;
        tracker.reset();
        self.repo.delete(&self.key).await.map_err(|err| {
            warn!(key = %self.key, error = %err, "failed to delete stored progress");
            ChecklistServiceError::PersistenceUnavailable(err)
        })?;
        debug!(key = %self.key, "progress reset");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ChecklistServiceError::NotFound` for unknown items.
    pub async fn item_done(&self, id: &ItemId) -> Result<bool, ChecklistServiceError> {
        Ok(self.tracker.lock().await.item_done(id)?)
    }

    /// # Errors
    ///
    /// Returns `ChecklistServiceError::NotFound` for unknown sections.
    pub async fn section_progress(
        &self,
        id: &SectionId,
    ) -> Result<SectionProgress, ChecklistServiceError> {
        Ok(self.tracker.lock().await.section_progress(id)?)
    }

    pub async fn overall_progress(&self) -> OverallProgress {
        self.tracker.lock().await.overall_progress()
    }

    /// # Errors
    ///
    /// Returns `ChecklistServiceError::NotFound` for unknown master items.
    pub async fn master_status(
        &self,
        id: &MasterItemId,
    ) -> Result<SectionProgress, ChecklistServiceError> {
        Ok(self.tracker.lock().await.master_status(id)?)
    }

    pub async fn snapshot(&self) -> ChecklistSnapshot {
        self.tracker.lock().await.snapshot()
    }

    async fn persist(&self, tracker: &Tracker) -> Result<(), ChecklistServiceError> {
        let stored = match encode_flags(&tracker.flag_map()) {
            Ok(blob) => self.repo.store(&self.key, &blob).await,
            Err(err) => Err(err),
        };
        stored.map_err(|err| {
            warn!(key = %self.key, error = %err, "failed to store progress");
            ChecklistServiceError::PersistenceUnavailable(err)
        })
    }
}
