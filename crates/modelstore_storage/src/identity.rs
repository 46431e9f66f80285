//! Identity generation for newly created records.

use std::fmt::Debug;
use uuid::Uuid;

/// Namespace for content-derived identities.
const CONTENT_NAMESPACE: Uuid = Uuid::from_bytes([
    0x6d, 0x6f, 0x64, 0x65, 0x6c, 0x73, 0x74, 0x6f, 0x72, 0x65, 0x2d, 0x69, 0x64, 0x2d, 0x76, 0x31,
]);

/// How [`crate::MemoryStorage`] computes the identity of a created record.
///
/// Identities are always UUID-shaped strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityStrategy {
    /// Name-based UUID (v5) over the record's debug representation.
    ///
    /// Deterministic: structurally identical records produce the same
    /// identity, so creating the same content twice overwrites the first
    /// entry instead of adding a second one.
    #[default]
    ContentHash,
    /// Random UUID (v4) per call.
    ///
    /// Identical records get distinct identities. Selecting this changes
    /// the observable behavior for same-content inputs.
    Random,
}

impl IdentityStrategy {
    /// Computes an identity for `item`.
    #[must_use]
    pub fn generate<T: Debug>(&self, item: &T) -> String {
        match self {
            Self::ContentHash => content_identity(item),
            Self::Random => Uuid::new_v4().to_string(),
        }
    }

    /// Returns true if equal inputs always map to the same identity.
    #[must_use]
    pub const fn is_deterministic(&self) -> bool {
        matches!(self, Self::ContentHash)
    }
}

fn content_identity<T: Debug>(item: &T) -> String {
    let repr = format!("{item:?}");
    Uuid::new_v5(&CONTENT_NAMESPACE, repr.as_bytes()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug)]
    #[allow(dead_code)]
    struct Sample {
        data: &'static str,
        status: i64,
    }

    #[test]
    fn content_hash_is_stable() {
        let a = Sample { data: "Hello", status: 0 };
        let b = Sample { data: "Hello", status: 0 };
        let strategy = IdentityStrategy::ContentHash;
        assert_eq!(strategy.generate(&a), strategy.generate(&b));
    }

    #[test]
    fn content_hash_differs_on_any_field() {
        let strategy = IdentityStrategy::ContentHash;
        let a = strategy.generate(&Sample { data: "Hello", status: 0 });
        let b = strategy.generate(&Sample { data: "Hello", status: 1 });
        let c = strategy.generate(&Sample { data: "Holla", status: 0 });
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn identities_are_uuid_shaped() {
        let sample = Sample { data: "x", status: 7 };
        for strategy in [IdentityStrategy::ContentHash, IdentityStrategy::Random] {
            let id = strategy.generate(&sample);
            let parsed = Uuid::parse_str(&id).unwrap();
            assert_eq!(parsed.to_string(), id);
        }
    }

    #[test]
    fn random_is_unique() {
        let sample = Sample { data: "same", status: 0 };
        let strategy = IdentityStrategy::Random;
        assert_ne!(strategy.generate(&sample), strategy.generate(&sample));
        assert!(!strategy.is_deterministic());
    }

    #[test]
    fn default_is_content_hash() {
        assert_eq!(IdentityStrategy::default(), IdentityStrategy::ContentHash);
        assert!(IdentityStrategy::default().is_deterministic());
    }

    #[derive(Debug)]
    #[allow(dead_code)]
    struct Owned {
        data: String,
        status: i64,
    }

    proptest! {
        #[test]
        fn content_hash_is_stable_for_equal_input(data in ".{0,32}", status in any::<i64>()) {
            let strategy = IdentityStrategy::ContentHash;
            let a = strategy.generate(&Owned { data: data.clone(), status });
            let b = strategy.generate(&Owned { data, status });
            prop_assert_eq!(a, b);
        }

        #[test]
        fn content_hash_is_canonical_uuid(data in ".{0,32}", status in any::<i64>()) {
            let id = IdentityStrategy::ContentHash.generate(&Owned { data, status });
            let parsed = Uuid::parse_str(&id).unwrap();
            prop_assert_eq!(parsed.get_version_num(), 5);
            prop_assert_eq!(parsed.to_string(), id);
        }

        #[test]
        fn content_hash_separates_statuses(data in ".{0,32}", a in any::<i64>(), b in any::<i64>()) {
            prop_assume!(a != b);
            let strategy = IdentityStrategy::ContentHash;
            prop_assert_ne!(
                strategy.generate(&Owned { data: data.clone(), status: a }),
                strategy.generate(&Owned { data, status: b })
            );
        }
    }
}
