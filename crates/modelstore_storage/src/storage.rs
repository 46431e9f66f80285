//! Storage contract definition.

use crate::error::{StorageError, StorageResult};
use crate::model::Model;
use std::sync::Arc;

/// How a backend applies [`Storage::update`].
///
/// Backends disagree on update granularity, so callers must not assume
/// that fields other than the status survive an update on every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSemantics {
    /// The stored record is replaced by the supplied value in full.
    FullReplace,
    /// Only the status field of the stored record is overwritten.
    StatusOnly,
}

/// A CRUD storage backend for records of type `T`.
///
/// Every backend implements exactly these five operations with the same
/// success/failure shape, so callers can swap backends without code changes.
///
/// # Invariants
///
/// - `find_one`, `update` and `delete` fail with [`StorageError::NotFound`]
///   when no record exists under the identity (a backend with structured
///   keys may reject malformed identities first with
///   [`StorageError::InvalidIdentity`])
/// - `find_all` on an empty store returns an empty vector, not an error
/// - A failed operation leaves the store unchanged
/// - Backends must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`crate::MemoryStorage`] - Mutex-guarded in-process map
/// - `modelstore_mongo::MongoStorage` - MongoDB collection
pub trait Storage<T: Model>: Send + Sync {
    /// Returns a detached copy of the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no record has this identity.
    fn find_one(&self, id: &str) -> StorageResult<T>;

    /// Returns every stored record.
    ///
    /// Ordering is unspecified and may differ between calls.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself fails.
    fn find_all(&self) -> StorageResult<Vec<T>>;

    /// Persists `item` under a freshly computed identity.
    ///
    /// Returns the identity the record was stored under.
    ///
    /// # Errors
    ///
    /// Never fails under normal conditions; network-backed stores surface
    /// driver failures as [`StorageError::Backend`].
    fn create(&self, item: &T) -> StorageResult<String>;

    /// Updates the record stored under `item.id()`.
    ///
    /// See [`Storage::update_semantics`] for what gets written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no record has this identity.
    fn update(&self, item: T) -> StorageResult<()>;

    /// Removes the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no record has this identity.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// Reports how this backend applies [`Storage::update`].
    fn update_semantics(&self) -> UpdateSemantics;

    /// Returns whether a record exists under `id`.
    ///
    /// # Errors
    ///
    /// Propagates every error from [`Storage::find_one`] except `NotFound`.
    fn exists(&self, id: &str) -> StorageResult<bool> {
        match self.find_one(id) {
            Ok(_) => Ok(true),
            Err(StorageError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Returns the number of stored records.
    ///
    /// **Warning**: this performs a full [`Storage::find_all`].
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Storage::find_all`].
    fn count(&self) -> StorageResult<usize> {
        Ok(self.find_all()?.len())
    }
}

impl<T: Model, S: Storage<T> + ?Sized> Storage<T> for Arc<S> {
    fn find_one(&self, id: &str) -> StorageResult<T> {
        (**self).find_one(id)
    }

    fn find_all(&self) -> StorageResult<Vec<T>> {
        (**self).find_all()
    }

    fn create(&self, item: &T) -> StorageResult<String> {
        (**self).create(item)
    }

    fn update(&self, item: T) -> StorageResult<()> {
        (**self).update(item)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        (**self).delete(id)
    }

    fn update_semantics(&self) -> UpdateSemantics {
        (**self).update_semantics()
    }
}

impl<T: Model, S: Storage<T> + ?Sized> Storage<T> for Box<S> {
    fn find_one(&self, id: &str) -> StorageResult<T> {
        (**self).find_one(id)
    }

    fn find_all(&self) -> StorageResult<Vec<T>> {
        (**self).find_all()
    }

    fn create(&self, item: &T) -> StorageResult<String> {
        (**self).create(item)
    }

    fn update(&self, item: T) -> StorageResult<()> {
        (**self).update(item)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        (**self).delete(id)
    }

    fn update_semantics(&self) -> UpdateSemantics {
        (**self).update_semantics()
    }
}
