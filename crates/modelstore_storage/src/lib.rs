//! # ModelStore Storage
//!
//! Storage contract and in-memory backend for ModelStore.
//!
//! This crate defines the generic CRUD surface every backend implements.
//! Records are opaque to the storage layer apart from two capabilities:
//! an identity and a status (see [`Model`]).
//!
//! ## Design Principles
//!
//! - Five operations: `find_one`, `find_all`, `create`, `update`, `delete`
//! - Backends are interchangeable behind [`Storage<T>`]
//! - Must be `Send + Sync` for concurrent access
//! - Update granularity is a documented per-backend property
//!   ([`UpdateSemantics`])
//!
//! ## Available Backends
//!
//! - [`MemoryStorage`] - Mutex-guarded map, for tests and ephemeral data
//! - `MongoStorage` in `modelstore_mongo` - MongoDB collection
//!
//! ## Example
//!
//! ```rust
//! use modelstore_storage::{MemoryStorage, Model, Storage};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Task {
//!     id: String,
//!     status: i64,
//! }
//!
//! impl Model for Task {
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//!
//!     fn status(&self) -> i64 {
//!         self.status
//!     }
//! }
//!
//! let store = MemoryStorage::new();
//! let id = store.create(&Task { id: "t1".into(), status: 0 }).unwrap();
//! let task = store.find_one(&id).unwrap();
//! assert_eq!(task.id, "t1");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod identity;
mod memory;
mod model;
mod storage;

pub use error::{StorageError, StorageResult};
pub use identity::IdentityStrategy;
pub use memory::MemoryStorage;
pub use model::Model;
pub use storage::{Storage, UpdateSemantics};
