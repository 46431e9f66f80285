//! In-memory storage backend.

use crate::error::{StorageError, StorageResult};
use crate::identity::IdentityStrategy;
use crate::model::Model;
use crate::storage::{Storage, UpdateSemantics};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, trace};

/// An in-memory storage backend.
///
/// Records live in a `HashMap` keyed by identity. A single mutex covers
/// the whole map: every operation, including the full iteration done by
/// `find_all`, runs as one critical section, so no caller ever observes a
/// partially applied insert, replace or removal.
///
/// Suitable for:
/// - Unit and integration tests
/// - Ephemeral data that does not need persistence
///
/// # Identities
///
/// `create` computes the key with the configured [`IdentityStrategy`].
/// The default, [`IdentityStrategy::ContentHash`], is deterministic:
/// structurally identical records collide on one key and the later insert
/// overwrites the earlier one.
///
/// # Thread Safety
///
/// Share across threads with `Arc<MemoryStorage<T>>`.
///
/// # Example
///
/// ```rust
/// use modelstore_storage::{MemoryStorage, Model, Storage};
/// use std::collections::HashMap;
///
/// #[derive(Debug, Clone)]
/// struct Item {
///     id: String,
///     status: i64,
/// }
///
/// impl Model for Item {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn status(&self) -> i64 {
///         self.status
///     }
/// }
///
/// let mut seed = HashMap::new();
/// seed.insert("1".to_string(), Item { id: "1".into(), status: 0 });
///
/// let store = MemoryStorage::with_data(seed);
/// store.update(Item { id: "1".into(), status: 2 }).unwrap();
/// assert_eq!(store.find_one("1").unwrap().status, 2);
/// assert!(store.delete("2").is_err());
/// ```
#[derive(Debug)]
pub struct MemoryStorage<T: Model> {
    data: Mutex<HashMap<String, T>>,
    strategy: IdentityStrategy,
}

impl<T: Model> Default for MemoryStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Model> MemoryStorage<T> {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_data(HashMap::new())
    }

    /// Creates a store pre-seeded with an existing identity to record map.
    #[must_use]
    pub fn with_data(data: HashMap<String, T>) -> Self {
        Self {
            data: Mutex::new(data),
            strategy: IdentityStrategy::default(),
        }
    }

    /// Creates a store from an optional seed.
    ///
    /// `None` yields an empty store.
    #[must_use]
    pub fn from_data(data: Option<HashMap<String, T>>) -> Self {
        Self::with_data(data.unwrap_or_default())
    }

    /// Sets the strategy used by `create` to compute identities.
    #[must_use]
    pub fn with_identity_strategy(mut self, strategy: IdentityStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the identity strategy in use.
    #[must_use]
    pub fn identity_strategy(&self) -> IdentityStrategy {
        self.strategy
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }

    /// Returns a copy of the whole identity to record map.
    ///
    /// Useful for testing and debugging.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, T> {
        self.data.lock().clone()
    }

    /// Removes every record.
    pub fn clear(&self) {
        self.data.lock().clear();
    }
}

impl<T: Model> From<HashMap<String, T>> for MemoryStorage<T> {
    fn from(data: HashMap<String, T>) -> Self {
        Self::with_data(data)
    }
}

impl<T: Model> Storage<T> for MemoryStorage<T> {
    fn find_one(&self, id: &str) -> StorageResult<T> {
        trace!(id, "memory find_one");
        let data = self.data.lock();
        data.get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found(id))
    }

    fn find_all(&self) -> StorageResult<Vec<T>> {
        let data = self.data.lock();
        trace!(count = data.len(), "memory find_all");
        Ok(data.values().cloned().collect())
    }

    fn create(&self, item: &T) -> StorageResult<String> {
        let id = self.strategy.generate(item);
        let mut data = self.data.lock();
        if data.insert(id.clone(), item.clone()).is_some() {
            debug!(id = %id, "identity collision, previous record overwritten");
        }
        trace!(id = %id, "memory create");
        Ok(id)
    }

    fn update(&self, item: T) -> StorageResult<()> {
        let mut data = self.data.lock();
        match data.get_mut(item.id()) {
            Some(slot) => {
                trace!(id = item.id(), "memory update");
                *slot = item;
                Ok(())
            }
            None => Err(StorageError::not_found(item.id())),
        }
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        trace!(id, "memory delete");
        let mut data = self.data.lock();
        data.remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(id))
    }

    fn update_semantics(&self) -> UpdateSemantics {
        UpdateSemantics::FullReplace
    }
}
