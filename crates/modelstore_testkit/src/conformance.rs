//! Contract conformance checks.
//!
//! Each check drives a backend through the [`Storage`] contract and panics
//! with a descriptive message when the backend deviates. Checks only
//! create their own records, so they can run against a seeded store.
//!
//! Update checks branch on [`Storage::update_semantics`]: a full-replace
//! backend must return exactly the updated record, a status-only backend
//! must keep every other field as it was.

use crate::fixtures::Fixture;
use modelstore_storage::{Storage, StorageError, UpdateSemantics};

const CREATE_SEED: usize = 10_000;
const DELETE_SEED: usize = 20_000;
const UPDATE_SEED: usize = 30_000;
const CARDINALITY_SEED: usize = 40_000;

/// Asserts that `find_one`, `update` and `delete` all reject `missing_id`.
///
/// `missing_id` must be an identity the store does not hold. A status-only
/// backend reports a missing update target as
/// [`StorageError::UpdateNotApplied`] with zero matches, which is accepted.
pub fn check_not_found_total<M, S>(store: &S, missing_id: &str)
where
    M: Fixture,
    S: Storage<M> + ?Sized,
{
    let before = store.count().expect("count before");

    match store.find_one(missing_id) {
        Err(StorageError::NotFound { id }) => assert_eq!(id, missing_id),
        other => panic!("find_one({missing_id:?}) should be NotFound, got {other:?}"),
    }

    match store.delete(missing_id) {
        Err(StorageError::NotFound { .. }) => {}
        other => panic!("delete({missing_id:?}) should be NotFound, got {other:?}"),
    }

    let ghost = M::fixture(0).rekeyed(missing_id);
    match (store.update(ghost), store.update_semantics()) {
        (Err(StorageError::NotFound { .. }), _) => {}
        (Err(StorageError::UpdateNotApplied { matched: 0, .. }), UpdateSemantics::StatusOnly) => {}
        (other, semantics) => {
            panic!("update({missing_id:?}) should be rejected ({semantics:?}), got {other:?}")
        }
    }

    assert_eq!(
        store.count().expect("count after"),
        before,
        "rejected operations must leave the store unchanged"
    );
}

/// Creates `n` distinct records and asserts each is found under the
/// identity `create` returned.
///
/// Returns the identities in creation order.
pub fn check_create_then_find<M, S>(store: &S, n: usize) -> Vec<String>
where
    M: Fixture,
    S: Storage<M> + ?Sized,
{
    let records: Vec<M> = (0..n).map(|i| M::fixture(CREATE_SEED + i)).collect();
    let ids: Vec<String> = records
        .iter()
        .map(|r| store.create(r).expect("create"))
        .collect();

    for (id, created) in ids.iter().zip(&records) {
        let found = store.find_one(id).expect("find created record");
        assert_eq!(
            found.payload(),
            created.payload(),
            "record under {id} does not match what was created"
        );
    }

    ids
}

/// Asserts that a deleted record can no longer be found or deleted.
pub fn check_delete_then_find<M, S>(store: &S)
where
    M: Fixture,
    S: Storage<M> + ?Sized,
{
    let id = store.create(&M::fixture(DELETE_SEED)).expect("create");
    assert!(store.exists(&id).expect("exists"));

    store.delete(&id).expect("delete");

    assert!(store.find_one(&id).expect_err("find after delete").is_not_found());
    assert!(store.delete(&id).expect_err("second delete").is_not_found());
    assert!(!store.exists(&id).expect("exists after delete"));
}

/// Asserts the backend applies updates according to its declared
/// [`UpdateSemantics`].
pub fn check_update_semantics<M, S>(store: &S)
where
    M: Fixture,
    S: Storage<M> + ?Sized,
{
    let id = store.create(&M::fixture(UPDATE_SEED)).expect("create");
    let stored = store.find_one(&id).expect("find created record");

    let changed = stored
        .rekeyed(&id)
        .with_payload("changed payload")
        .with_status(stored.status() + 1);
    store.update(changed.clone()).expect("update");

    let after = store.find_one(&id).expect("find updated record");
    match store.update_semantics() {
        UpdateSemantics::FullReplace => {
            assert_eq!(after, changed, "full replace must store the update verbatim");
        }
        UpdateSemantics::StatusOnly => {
            assert_eq!(after.status(), changed.status());
            assert_eq!(
                after.payload(),
                stored.payload(),
                "status-only update must not touch other fields"
            );
        }
    }
}

/// Creates `n` distinct records and asserts `find_all` grows by exactly `n`.
pub fn check_find_all_cardinality<M, S>(store: &S, n: usize)
where
    M: Fixture,
    S: Storage<M> + ?Sized,
{
    let baseline = store.find_all().expect("find_all").len();

    for i in 0..n {
        store
            .create(&M::fixture(CARDINALITY_SEED + baseline + i))
            .expect("create");
    }

    assert_eq!(store.find_all().expect("find_all").len(), baseline + n);
    assert_eq!(store.count().expect("count"), baseline + n);
}

/// Runs every check in this module against `store`.
pub fn check_all<M, S>(store: &S, missing_id: &str)
where
    M: Fixture,
    S: Storage<M> + ?Sized,
{
    check_not_found_total::<M, S>(store, missing_id);
    check_create_then_find::<M, S>(store, 5);
    check_delete_then_find::<M, S>(store);
    check_update_semantics::<M, S>(store);
    check_find_all_cardinality::<M, S>(store, 5);
}
