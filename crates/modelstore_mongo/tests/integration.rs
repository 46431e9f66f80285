//! Integration tests for the MongoDB backend.
//!
//! Tests marked `#[ignore]` need a running MongoDB. Point them at one with
//! `MODELSTORE_MONGO_URI` (defaults to `mongodb://localhost:27017`) and run
//! `cargo test -p modelstore_mongo -- --ignored`.

use modelstore_mongo::{
    Model, MongoConfig, MongoStorage, Storage, StorageError, UpdateSemantics, ENV_URI,
};
use modelstore_testkit::{check_all, check_find_all_cardinality, init_tracing, Fixture};
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TEST_DATABASE: &str = "modelstore_test";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Item {
    #[serde(
        rename = "_id",
        with = "mongodb::bson::serde_helpers::hex_string_as_object_id"
    )]
    id: String,
    name: String,
    status: i64,
}

impl Model for Item {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> i64 {
        self.status
    }
}

impl Fixture for Item {
    fn fixture(seed: usize) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            name: format!("item-{seed}"),
            status: 0,
        }
    }

    fn rekeyed(&self, id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..self.clone()
        }
    }

    fn with_status(&self, status: i64) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    fn with_payload(&self, payload: &str) -> Self {
        Self {
            name: payload.to_string(),
            ..self.clone()
        }
    }

    fn payload(&self) -> &str {
        &self.name
    }
}

fn item(name: &str, status: i64) -> Item {
    Item {
        id: ObjectId::new().to_hex(),
        name: name.to_string(),
        status,
    }
}

/// Builds the test configuration from the environment.
///
/// Without `MODELSTORE_MONGO_DATABASE` and `MODELSTORE_MONGO_COLLECTION` set,
/// the tests use the `modelstore_test` database on `MODELSTORE_MONGO_URI` or
/// localhost.
fn test_config() -> MongoConfig {
    MongoConfig::from_env().unwrap_or_else(|_| {
        let uri = std::env::var(ENV_URI).unwrap_or_else(|_| MongoConfig::default().uri);
        MongoConfig::new(uri, TEST_DATABASE, "items")
    })
}

/// Connects to a freshly dropped collection named after the test.
fn open(collection: &str) -> MongoStorage<Item> {
    init_tracing();
    let config = test_config()
        .with_collection(collection)
        .with_server_selection_timeout(Duration::from_secs(5))
        .with_app_name("modelstore-tests");

    let storage = MongoStorage::connect(&config).expect("mongo should be reachable");
    storage.collection().drop().run().expect("drop collection");
    storage
}

#[test]
fn connect_fails_fast_when_unreachable() {
    let config = MongoConfig::new("mongodb://127.0.0.1:1", TEST_DATABASE, "unreachable")
        .with_connect_timeout(Duration::from_millis(200))
        .with_server_selection_timeout(Duration::from_millis(200));

    let err = MongoStorage::<Item>::connect(&config).unwrap_err();
    assert!(matches!(err, StorageError::BackendUnavailable { .. }), "{err}");
}

#[test]
fn connect_rejects_malformed_uri() {
    let config = MongoConfig::new("not a uri", TEST_DATABASE, "items");

    let err = MongoStorage::<Item>::connect(&config).unwrap_err();
    assert!(matches!(err, StorageError::BackendUnavailable { .. }), "{err}");
}

#[test]
fn connect_rejects_invalid_config() {
    let config = test_config().with_collection("");

    let err = MongoStorage::<Item>::connect(&config).unwrap_err();
    assert!(matches!(err, StorageError::Config { .. }));
}

#[test]
#[ignore = "requires a running MongoDB"]
fn mongo_conformance() {
    let storage = open("conformance");
    assert_eq!(storage.update_semantics(), UpdateSemantics::StatusOnly);
    check_all::<Item, _>(&storage, &ObjectId::new().to_hex());
}

#[test]
#[ignore = "requires a running MongoDB"]
fn create_then_find_one() {
    let storage = open("create_find");
    let bob = item("Bob", 0);

    let id = storage.create(&bob).unwrap();
    assert_eq!(id, bob.id);
    assert_eq!(storage.find_one(&id).unwrap(), bob);
}

#[test]
#[ignore = "requires a running MongoDB"]
fn update_sets_status_only() {
    let storage = open("update_status");
    let bob = item("Bob", 0);
    let id = storage.create(&bob).unwrap();

    storage
        .update(Item {
            id: id.clone(),
            name: "Bill".into(),
            status: 200,
        })
        .unwrap();

    let found = storage.find_one(&id).unwrap();
    assert_eq!(found.status, 200);
    assert_eq!(found.name, "Bob");
}

#[test]
#[ignore = "requires a running MongoDB"]
fn update_without_change_is_not_applied() {
    let storage = open("update_noop");
    let bob = item("Bob", 7);
    let id = storage.create(&bob).unwrap();

    let err = storage.update(bob).unwrap_err();
    assert!(matches!(
        err,
        StorageError::UpdateNotApplied { matched: 1, modified: 0, .. }
    ));
    assert_eq!(err.id(), Some(id.as_str()));
}

#[test]
#[ignore = "requires a running MongoDB"]
fn update_missing_is_not_applied() {
    let storage = open("update_missing");

    let err = storage.update(item("Ghost", 1)).unwrap_err();
    assert!(matches!(
        err,
        StorageError::UpdateNotApplied { matched: 0, modified: 0, .. }
    ));
}

#[test]
#[ignore = "requires a running MongoDB"]
fn malformed_identities_are_rejected() {
    let storage = open("malformed");

    assert!(matches!(
        storage.find_one("1").unwrap_err(),
        StorageError::InvalidIdentity { .. }
    ));
    assert!(matches!(
        storage.delete("").unwrap_err(),
        StorageError::InvalidIdentity { .. }
    ));
    let mut bad = item("Bad", 1);
    bad.id = "xyz".into();
    assert!(matches!(
        storage.update(bad).unwrap_err(),
        StorageError::InvalidIdentity { .. }
    ));
}

#[test]
#[ignore = "requires a running MongoDB"]
fn delete_then_find_is_not_found() {
    let storage = open("delete");
    let id = storage.create(&item("Alice", 0)).unwrap();

    storage.delete(&id).unwrap();

    assert!(storage.find_one(&id).unwrap_err().is_not_found());
    assert!(storage.delete(&id).unwrap_err().is_not_found());
}

#[test]
#[ignore = "requires a running MongoDB"]
fn find_all_counts_documents() {
    let storage = open("find_all");
    assert!(storage.find_all().unwrap().is_empty());

    storage.create(&item("Bob", 0)).unwrap();
    storage.create(&item("Alice", 0)).unwrap();
    assert_eq!(storage.find_all().unwrap().len(), 2);

    check_find_all_cardinality::<Item, _>(&storage, 3);
}

#[test]
#[ignore = "requires a running MongoDB"]
fn set_collection_retargets_handle() {
    let mut storage = open("first");
    storage.create(&item("Bob", 0)).unwrap();

    storage.set_collection("second");
    storage.collection().drop().run().unwrap();

    assert_eq!(storage.collection_name(), "second");
    assert_eq!(storage.database_name(), test_config().database);
    assert!(storage.find_all().unwrap().is_empty());
}

#[test]
#[ignore = "requires a running MongoDB"]
fn undecodable_document_is_backend_error() {
    let storage = open("undecodable");
    let oid = ObjectId::new();
    storage
        .collection()
        .clone_with_type::<Document>()
        .insert_one(doc! { "_id": oid, "unexpected": true })
        .run()
        .unwrap();

    let err = storage.find_one(&oid.to_hex()).unwrap_err();
    assert!(matches!(err, StorageError::Backend(_)), "{err}");
    assert!(matches!(
        storage.find_all().unwrap_err(),
        StorageError::Backend(_)
    ));
}
