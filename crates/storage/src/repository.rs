use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key the flag map blob is stored under.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub const DEFAULT: &'static str = "myChecklistProgress";

    /// Creates a key, falling back to the default for blank input.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self(trimmed.to_owned())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StorageKey {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Debug for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageKey({:?})", self.0)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable key-value store for serialized progress.
///
/// The whole flag map is written as one blob per call; there are no
/// partial updates.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the blob stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load(&self, key: &StorageKey) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the blob cannot be written.
    async fn store(&self, key: &StorageKey, blob: &str) -> Result<(), StorageError>;

    /// Remove the blob stored under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn delete(&self, key: &StorageKey) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    blobs: Arc<Mutex<HashMap<StorageKey, String>>>,
    stores: Arc<AtomicUsize>,
    deletes: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-seeded with one blob.
    #[must_use]
    pub fn with_blob(key: &StorageKey, blob: impl Into<String>) -> Self {
        let repo = Self::new();
        if let Ok(mut guard) = repo.blobs.lock() {
            guard.insert(key.clone(), blob.into());
        }
        repo
    }

    /// Current blob under `key`, bypassing the async trait.
    #[must_use]
    pub fn blob(&self, key: &StorageKey) -> Option<String> {
        self.blobs
            .lock()
            .ok()
            .and_then(|guard| guard.get(key).cloned())
    }

    /// Number of successful `store` calls so far.
    #[must_use]
    pub fn store_calls(&self) -> usize {
        self.stores.load(Ordering::SeqCst)
    }

    /// Number of successful `delete` calls so far.
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn store(&self, key: &StorageKey, blob: &str) -> Result<(), StorageError> {
        let mut guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.clone(), blob.to_owned());
        self.stores.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), StorageError> {
        let mut guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_falls_back_to_default() {
        assert_eq!(StorageKey::new("  ").as_str(), StorageKey::DEFAULT);
        assert_eq!(StorageKey::new(" run-2 ").as_str(), "run-2");
    }

    #[tokio::test]
    async fn stores_loads_and_deletes_blob() {
        let repo = InMemoryRepository::new();
        let key = StorageKey::default();
        assert_eq!(repo.load(&key).await.unwrap(), None);

        repo.store(&key, r#"{"a":true}"#).await.unwrap();
        assert_eq!(repo.load(&key).await.unwrap().as_deref(), Some(r#"{"a":true}"#));

        repo.store(&key, r#"{"a":false}"#).await.unwrap();
        assert_eq!(repo.blob(&key).as_deref(), Some(r#"{"a":false}"#));

        repo.delete(&key).await.unwrap();
        assert_eq!(repo.load(&key).await.unwrap(), None);
        repo.delete(&key).await.unwrap();

        assert_eq!(repo.store_calls(), 2);
        assert_eq!(repo.delete_calls(), 2);
    }

    #[tokio::test]
    async fn keys_are_isolated() {
        let first = StorageKey::new("first");
        let second = StorageKey::new("second");
        let repo = InMemoryRepository::with_blob(&first, "{}");
        assert_eq!(repo.load(&second).await.unwrap(), None);
        assert_eq!(repo.load(&first).await.unwrap().as_deref(), Some("{}"));
    }
}
