//! MongoDB-backed storage.

use crate::config::MongoConfig;
use modelstore_storage::{Model, Storage, StorageError, StorageResult, UpdateSemantics};
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::{ClientOptions, ReadPreference, SelectionCriteria};
use mongodb::sync::{Client, Collection, Database};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Document field written by [`Storage::update`].
pub const STATUS_FIELD: &str = "status";

/// A storage backend over one MongoDB collection.
///
/// Records are stored as whole documents keyed by `_id`. Identities are
/// the 24 hex digit form of an ObjectId.
///
/// # Update Semantics
///
/// `update` is partial: it sets only the `status` field of the matched
/// document to `item.status()` and leaves every other field as stored.
/// An update that matches no document, or matches one whose status already
/// has that value, fails with [`StorageError::UpdateNotApplied`].
///
/// # Errors
///
/// Malformed identities fail with [`StorageError::InvalidIdentity`] before
/// any request is sent. Driver failures during an operation (network loss,
/// server errors, documents that do not decode into `T`) surface as
/// [`StorageError::Backend`] with the driver error as source. Those only
/// occur after a successful [`MongoStorage::connect`], so they are covered
/// by the ignored tests against a live server, not by offline tests.
pub struct MongoStorage<T: Model> {
    database: Database,
    collection: Collection<T>,
}

impl<T> MongoStorage<T>
where
    T: Model + Serialize + DeserializeOwned + Unpin,
{
    /// Connects to the deployment described by `config`.
    ///
    /// The deployment is pinged with a primary read preference before the
    /// handle is returned.
    ///
    /// # Errors
    ///
    /// - [`StorageError::Config`] if the configuration is invalid
    /// - [`StorageError::BackendUnavailable`] if the URI cannot be parsed
    ///   or the deployment does not answer the ping
    pub fn connect(config: &MongoConfig) -> StorageResult<Self> {
        config.validate()?;

        let mut options = ClientOptions::parse(config.uri.as_str())
            .run()
            .map_err(|e| StorageError::backend_unavailable(e.to_string()))?;
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.server_selection_timeout);
        if let Some(name) = &config.app_name {
            options.app_name = Some(name.clone());
        }

        let client = Client::with_options(options)
            .map_err(|e| StorageError::backend_unavailable(e.to_string()))?;
        let database = client.database(&config.database);

        if let Err(e) = database
            .run_command(doc! { "ping": 1 })
            .selection_criteria(SelectionCriteria::ReadPreference(ReadPreference::Primary))
            .run()
        {
            warn!(database = %config.database, error = %e, "mongo ping failed");
            return Err(StorageError::backend_unavailable(e.to_string()));
        }

        info!(
            database = %config.database,
            collection = %config.collection,
            "connected to mongo"
        );

        let collection = database.collection(&config.collection);
        Ok(Self {
            database,
            collection,
        })
    }

    /// Points this handle at another collection of the same database.
    pub fn set_collection(&mut self, name: &str) {
        debug!(collection = name, "switching mongo collection");
        self.collection = self.database.collection(name);
    }

    /// Returns the underlying driver collection.
    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Returns the collection name.
    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// Returns the database name.
    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}

impl<T: Model> fmt::Debug for MongoStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoStorage")
            .field("database", &self.database.name())
            .field("collection", &self.collection.name())
            .finish()
    }
}

impl<T> Storage<T> for MongoStorage<T>
where
    T: Model + Serialize + DeserializeOwned + Unpin,
{
    fn find_one(&self, id: &str) -> StorageResult<T> {
        debug!(id, "mongo find_one");
        let filter = id_filter(parse_object_id(id)?);
        self.collection
            .find_one(filter)
            .run()
            .map_err(StorageError::backend)?
            .ok_or_else(|| StorageError::not_found(id))
    }

    fn find_all(&self) -> StorageResult<Vec<T>> {
        debug!(collection = self.collection.name(), "mongo find_all");
        let cursor = self
            .collection
            .find(Document::new())
            .run()
            .map_err(StorageError::backend)?;

        let mut items = Vec::new();
        for item in cursor {
            items.push(item.map_err(StorageError::backend)?);
        }
        Ok(items)
    }

    fn create(&self, item: &T) -> StorageResult<String> {
        let result = self
            .collection
            .insert_one(item)
            .run()
            .map_err(StorageError::backend)?;
        let id = render_id(&result.inserted_id);
        debug!(id = %id, "mongo create");
        Ok(id)
    }

    fn update(&self, item: T) -> StorageResult<()> {
        let filter = id_filter(parse_object_id(item.id())?);
        let mut fields = Document::new();
        fields.insert(STATUS_FIELD, item.status());
        let update = doc! { "$set": fields };

        let result = self
            .collection
            .update_one(filter, update)
            .run()
            .map_err(StorageError::backend)?;
        debug!(
            id = item.id(),
            matched = result.matched_count,
            modified = result.modified_count,
            "mongo update"
        );

        if result.matched_count == 0 || result.modified_count == 0 {
            return Err(StorageError::update_not_applied(
                item.id(),
                result.matched_count,
                result.modified_count,
            ));
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let filter = id_filter(parse_object_id(id)?);
        let result = self
            .collection
            .delete_one(filter)
            .run()
            .map_err(StorageError::backend)?;
        debug!(id, deleted = result.deleted_count, "mongo delete");

        if result.deleted_count == 0 {
            return Err(StorageError::not_found(id));
        }
        Ok(())
    }

    fn update_semantics(&self) -> UpdateSemantics {
        UpdateSemantics::StatusOnly
    }
}

/// Parses an identity into the collection's native key.
fn parse_object_id(id: &str) -> StorageResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|e| StorageError::invalid_identity(id, e.to_string()))
}

fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Renders an inserted `_id` as an identity string.
fn render_id(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}
