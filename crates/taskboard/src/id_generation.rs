//! Sequential ID generation and parsing.
//!
//! Identifiers have the form `{prefix}{counter}` where the prefix is a single
//! letter per entity kind and the counter is zero-padded to at least
//! [`ID_PAD_WIDTH`] digits (e.g. `P0004`). The numeric part *is* the slot
//! index of the entity in its store, so parsing an identifier yields the
//! position to read from.
//!
//! # Example
//!
//! ```
//! use taskboard::domain::EntityKind;
//! use taskboard::id_generation::IdGenerator;
//!
//! let mut generator = IdGenerator::new(EntityKind::Project);
//!
//! let first = generator.generate();
//! assert_eq!(first.as_str(), "P0000");
//! assert_eq!(generator.parse_index(first.as_str()).unwrap(), 0);
//!
//! let second = generator.generate();
//! assert_eq!(second.as_str(), "P0001");
//! ```

use crate::domain::{EntityId, EntityKind};
use thiserror::Error;
use tracing::debug;

/// Minimum number of digits in the numeric part of an identifier
pub const ID_PAD_WIDTH: usize = 4;

/// Errors that can occur while parsing an identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The identifier does not have the `{prefix}{digits}` shape
    #[error("Malformed identifier '{id}': {reason}")]
    Malformed {
        /// The identifier as supplied
        id: String,
        /// Why it was rejected
        reason: String,
    },
}

impl IdError {
    fn malformed(id: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Counter-based ID generator for a single entity kind.
///
/// The counter starts at zero, only moves forward, and is never rewound after
/// deletions: a slot vacated by a delete is not refilled by `generate`.
/// Construct one generator per kind at startup and hand it to the service
/// that owns that kind.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    kind: EntityKind,
    counter: usize,
}

impl IdGenerator {
    /// Create a new ID generator for `kind` with its counter at zero
    pub fn new(kind: EntityKind) -> Self {
        Self { kind, counter: 0 }
    }

    /// The entity kind this generator issues identifiers for
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The slot index the next call to [`generate`](Self::generate) will use
    pub fn next_index(&self) -> usize {
        self.counter
    }

    /// Issue the next identifier and advance the counter
    pub fn generate(&mut self) -> EntityId {
        let id = format_id(self.kind, self.counter);
        self.counter += 1;
        debug!(kind = %self.kind, %id, "Generated identifier");
        id
    }

    /// Parse an identifier of this generator's kind back to its slot index.
    ///
    /// # Errors
    ///
    /// Returns `IdError::Malformed` if the prefix is wrong or the remainder is
    /// not a plain non-negative decimal integer.
    pub fn parse_index(&self, id: &str) -> Result<usize, IdError> {
        parse_index(id, self.kind)
    }
}

/// Format `index` as an identifier of `kind`
pub fn format_id(kind: EntityKind, index: usize) -> EntityId {
    EntityId::new(format!(
        "{}{:0width$}",
        kind.prefix(),
        index,
        width = ID_PAD_WIDTH
    ))
}

/// Parse an identifier of `kind` to its slot index.
///
/// The prefix must match `kind` exactly (case-sensitive) and be followed by
/// one or more ASCII digits. Signs, whitespace and separators are rejected.
///
/// # Errors
///
/// Returns `IdError::Malformed` describing the first problem found.
pub fn parse_index(id: &str, kind: EntityKind) -> Result<usize, IdError> {
    let Some(digits) = id.strip_prefix(kind.prefix()) else {
        return Err(IdError::malformed(
            id,
            format!("expected prefix '{}'", kind.prefix()),
        ));
    };

    if digits.is_empty() {
        return Err(IdError::malformed(id, "missing numeric part"));
    }

    // str::parse accepts a leading '+', so check the characters explicitly
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdError::malformed(id, "numeric part must contain only digits"));
    }

    digits
        .parse::<usize>()
        .map_err(|e| IdError::malformed(id, format!("numeric part out of range: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_sequential_generation() {
        let mut generator = IdGenerator::new(EntityKind::Task);

        let ids: Vec<EntityId> = (0..3).map(|_| generator.generate()).collect();

        assert_eq!(ids[0].as_str(), "T0000");
        assert_eq!(ids[1].as_str(), "T0001");
        assert_eq!(ids[2].as_str(), "T0002");
        assert_eq!(generator.next_index(), 3);
    }

    #[test]
    fn test_kinds_have_independent_counters() {
        let mut projects = IdGenerator::new(EntityKind::Project);
        let mut users = IdGenerator::new(EntityKind::User);

        projects.generate();
        projects.generate();

        assert_eq!(users.generate().as_str(), "U0000");
        assert_eq!(projects.generate().as_str(), "P0002");
    }

    #[test]
    fn test_padding_grows_past_four_digits() {
        assert_eq!(format_id(EntityKind::User, 12345).as_str(), "U12345");
        assert_eq!(parse_index("U12345", EntityKind::User).unwrap(), 12345);
    }

    #[test]
    fn test_parse_round_trip() {
        let mut generator = IdGenerator::new(EntityKind::Project);
        for expected in 0..20 {
            let id = generator.generate();
            assert_eq!(generator.parse_index(id.as_str()).unwrap(), expected);
        }
    }

    #[rstest]
    #[case("P0004", 4)]
    #[case("P4", 4)]
    #[case("P0000", 0)]
    #[case("P0100", 100)]
    fn test_parse_valid(#[case] id: &str, #[case] expected: usize) {
        assert_eq!(parse_index(id, EntityKind::Project).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("P")]
    #[case("T0001")]
    #[case("p0001")]
    #[case("P+001")]
    #[case("P-001")]
    #[case("P00a1")]
    #[case("P 001")]
    #[case("P99999999999999999999999999")]
    fn test_parse_malformed(#[case] id: &str) {
        let err = parse_index(id, EntityKind::Project).unwrap_err();
        assert!(matches!(err, IdError::Malformed { .. }));
    }

    #[test]
    fn test_parse_is_repeatable() {
        let first = parse_index("Pxyz", EntityKind::Project).unwrap_err();
        let second = parse_index("Pxyz", EntityKind::Project).unwrap_err();
        assert_eq!(first, second);
    }
}
