//! # ModelStore Mongo
//!
//! MongoDB storage backend for ModelStore.
//!
//! [`MongoStorage`] implements the same [`Storage`] contract as the
//! in-memory backend on top of a MongoDB collection, using the driver's
//! blocking API.
//!
//! ## Backend Differences
//!
//! - Identities are ObjectId hex strings; anything else is rejected with
//!   [`StorageError::InvalidIdentity`]
//! - `update` only sets the `status` field
//!   ([`UpdateSemantics::StatusOnly`]) and fails with
//!   [`StorageError::UpdateNotApplied`] when nothing was modified
//! - Construction pings the deployment and fails fast with
//!   [`StorageError::BackendUnavailable`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use modelstore_mongo::{MongoConfig, MongoStorage};
//! use modelstore_storage::Storage;
//!
//! let config = MongoConfig::new("mongodb://localhost:27017", "app", "tasks");
//! let tasks: MongoStorage<Task> = MongoStorage::connect(&config)?;
//! let id = tasks.create(&task)?;
//! let found = tasks.find_one(&id)?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod store;

pub use config::{MongoConfig, ENV_COLLECTION, ENV_DATABASE, ENV_URI};
pub use store::{MongoStorage, STATUS_FIELD};

pub use modelstore_storage::{Model, Storage, StorageError, StorageResult, UpdateSemantics};
