//! Test fixtures and store helpers.
//!
//! Provides a simple record type, seeding helpers and tracing setup
//! shared by the workspace's tests.

use modelstore_storage::{MemoryStorage, Model};
use std::collections::HashMap;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// A record with an identity, a payload and a status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TestRecord {
    /// Record identity.
    pub id: String,
    /// Opaque payload.
    pub data: String,
    /// Lifecycle status.
    pub status: i64,
}

impl Model for TestRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> i64 {
        self.status
    }
}

/// Builds a [`TestRecord`].
pub fn record(id: &str, data: &str, status: i64) -> TestRecord {
    TestRecord {
        id: id.to_string(),
        data: data.to_string(),
        status,
    }
}

/// A record type the conformance checks can derive variants of.
///
/// Implemented by [`TestRecord`]; backend tests with their own document
/// shape implement it for their model.
pub trait Fixture: Model + PartialEq {
    /// Returns a record whose content is distinct for each `seed`.
    fn fixture(seed: usize) -> Self;

    /// Returns a copy carrying `id` as its identity.
    fn rekeyed(&self, id: &str) -> Self;

    /// Returns a copy with a different status.
    fn with_status(&self, status: i64) -> Self;

    /// Returns a copy with a different payload.
    fn with_payload(&self, payload: &str) -> Self;

    /// Returns the payload.
    fn payload(&self) -> &str;
}

impl Fixture for TestRecord {
    fn fixture(seed: usize) -> Self {
        record("", &format!("record-{seed}"), 0)
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
            data: payload.to_string(),
            ..self.clone()
        }
    }

    fn payload(&self) -> &str {
        &self.data
    }
}

/// Builds a seed map keyed by each record's own identity.
pub fn seed_map<I>(records: I) -> HashMap<String, TestRecord>
where
    I: IntoIterator<Item = TestRecord>,
{
    records.into_iter().map(|r| (r.id.clone(), r)).collect()
}

/// Creates a memory store holding records `"1"..="n"`.
pub fn seeded_memory(n: usize) -> MemoryStorage<TestRecord> {
    let records = (1..=n).map(|i| record(&i.to_string(), &format!("data-{i}"), 0));
    MemoryStorage::with_data(seed_map(records))
}

/// Installs a tracing subscriber writing through the test harness.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`. Safe to call
/// from every test.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelstore_storage::Storage;

    #[test]
    fn test_seeded_memory() {
        let store = seeded_memory(3);
        assert_eq!(store.len(), 3);
        assert_eq!(store.find_one("2").unwrap(), record("2", "data-2", 0));
    }

    #[test]
    fn test_seed_map_keys_by_id() {
        let map = seed_map([record("a", "x", 0), record("b", "y", 1)]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["b"].status, 1);
    }

    #[test]
    fn test_fixtures_are_distinct() {
        assert_ne!(TestRecord::fixture(1), TestRecord::fixture(2));
        let base = TestRecord::fixture(1);
        assert_eq!(base.rekeyed("k").id, "k");
        assert_eq!(base.with_status(4).status(), 4);
        assert_eq!(base.with_payload("p").payload(), "p");
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}
