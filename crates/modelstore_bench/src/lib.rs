//! Benchmark utilities.

use modelstore_storage::MemoryStorage;
use modelstore_testkit::{record, seed_map, TestRecord};

/// Generate a payload of the specified size.
pub fn payload(size: usize) -> String {
    (0..size).map(|i| char::from(b'a' + (i % 26) as u8)).collect()
}

/// Generate records with distinct content and empty identities.
pub fn generate_records(count: usize, payload_size: usize) -> Vec<TestRecord> {
    let body = payload(payload_size);
    (0..count)
        .map(|i| record("", &format!("{i}:{body}"), 0))
        .collect()
}

/// Create a memory store seeded with `count` records keyed `"0".."count"`.
pub fn seeded_store(count: usize, payload_size: usize) -> MemoryStorage<TestRecord> {
    let body = payload(payload_size);
    MemoryStorage::with_data(seed_map(
        (0..count).map(|i| record(&i.to_string(), &body, 0)),
    ))
}
