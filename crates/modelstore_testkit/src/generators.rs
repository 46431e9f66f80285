//! Property-based test generators using proptest.
//!
//! Identities are drawn from a small space so that generated operation
//! sequences hit existing keys as often as missing ones.

use crate::fixtures::TestRecord;
use proptest::prelude::*;

/// Strategy for identities, including the empty string.
pub fn identity_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9]{0,2}").expect("Invalid regex")
}

/// Strategy for record payloads.
pub fn payload_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z ]{0,16}").expect("Invalid regex")
}

/// Strategy for records carrying an identity from [`identity_strategy`].
pub fn record_strategy() -> impl Strategy<Value = TestRecord> {
    (identity_strategy(), payload_strategy(), -3i64..3).prop_map(|(id, data, status)| {
        TestRecord { id, data, status }
    })
}

/// A single storage operation.
#[derive(Debug, Clone)]
pub enum StoreOperation {
    /// Create a record.
    Create(TestRecord),
    /// Look up an identity.
    FindOne(String),
    /// List every record.
    FindAll,
    /// Update the record under the record's own identity.
    Update(TestRecord),
    /// Delete an identity.
    Delete(String),
}

/// Strategy for generating storage operations.
pub fn operation_strategy() -> impl Strategy<Value = StoreOperation> {
    prop_oneof![
        2 => record_strategy().prop_map(StoreOperation::Create),
        3 => identity_strategy().prop_map(StoreOperation::FindOne),
        1 => Just(StoreOperation::FindAll),
        3 => record_strategy().prop_map(StoreOperation::Update),
        2 => identity_strategy().prop_map(StoreOperation::Delete),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOperation>> {
    prop::collection::vec(operation_strategy(), min_ops..max_ops)
}

/// Strategy for seed records with unique identities.
pub fn seed_strategy(max_records: usize) -> impl Strategy<Value = Vec<TestRecord>> {
    prop::collection::btree_map(identity_strategy(), (payload_strategy(), -3i64..3), 0..max_records)
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(id, (data, status))| TestRecord { id, data, status })
                .collect()
        })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

/// Environment variable that switches property tests to
/// [`PropTestConfig::thorough`].
pub const THOROUGH_ENV: &str = "MODELSTORE_PROPTEST_THOROUGH";

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for long oracle runs.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 2048,
            max_shrink_iters: 20_000,
        }
    }

    /// Picks [`PropTestConfig::thorough`] when [`THOROUGH_ENV`] is set,
    /// the default configuration otherwise.
    #[must_use]
    pub fn from_env() -> Self {
        Self::select(std::env::var_os(THOROUGH_ENV).is_some())
    }

    fn select(thorough: bool) -> Self {
        if thorough {
            Self::thorough()
        } else {
            Self::default()
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
