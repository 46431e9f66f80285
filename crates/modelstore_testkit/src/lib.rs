//! # ModelStore Testkit
//!
//! Test utilities for ModelStore.
//!
//! This crate provides:
//! - Test fixtures and a ready-made [`TestRecord`] model
//! - Property-based test generators using proptest
//! - Contract conformance checks runnable against any backend
//! - Concurrent stress testing utilities
//! - Tracing setup for test output
//!
//! ## Usage
//!
//! ```rust
//! use modelstore_testkit::prelude::*;
//!
//! let store = seeded_memory(3);
//! check_find_all_cardinality(&store, 5);
//! check_not_found_total(&store, "missing");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod conformance;
pub mod fixtures;
pub mod generators;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::conformance::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::stress::*;
}

pub use conformance::*;
pub use fixtures::*;
pub use generators::*;
pub use stress::*;
