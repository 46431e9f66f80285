//! The record capability set.

use std::fmt::Debug;

/// A record that can be held by a [`crate::Storage`] backend.
///
/// Storage only relies on two capabilities: an identity and a status.
/// Every other field is opaque and is carried along untouched.
///
/// `Debug` is part of the bound because [`crate::MemoryStorage`] derives
/// content identities from the record's debug representation.
pub trait Model: Clone + Debug + Send + Sync + 'static {
    /// Returns the unique addressable key of this record.
    fn id(&self) -> &str;

    /// Returns the mutable lifecycle status of this record.
    fn status(&self) -> i64;
}
