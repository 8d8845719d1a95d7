//! Error types for the lrustore library.
//!
//! ## Key Components
//!
//! - [`InvalidArgument`]: Returned when a caller-supplied parameter is out of
//!   range (a negative capacity passed to
//!   [`LruStore::try_resize`](crate::lru::LruStore::try_resize) or
//!   [`StoreBuilder::try_new`](crate::builder::StoreBuilder::try_new)).
//! - [`InvariantError`]: Returned by `check_invariants`; each variant names
//!   the structural rule that the lookup table or recency list broke.
//!
//! Missing keys are never errors; lookups return `None`.
//!
//! ## Example Usage
//!
//! ```
//! use lrustore::error::InvalidArgument;
//! use lrustore::lru::LruStore;
//!
//! let mut store: LruStore<u32, u32> = LruStore::new(4);
//! store.put(1, 10);
//!
//! let err: InvalidArgument = store.try_resize(-2).unwrap_err();
//! assert!(err.to_string().contains("-2"));
//! assert_eq!(store.capacity(), 4);
//! assert_eq!(store.len(), 1);
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvalidArgument
// ---------------------------------------------------------------------------

/// Error returned when an argument is outside its accepted range.
///
/// The operation that produced it has not modified any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgument(String);

impl InvalidArgument {
    /// Creates a new `InvalidArgument` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Builds the error reported for a negative capacity.
    pub(crate) fn negative_capacity(requested: i64) -> Self {
        Self(format!("capacity can not be negative ({requested})"))
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl std::error::Error for InvalidArgument {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Structural defect found by a `check_invariants` walk.
///
/// The recency-list variants come from
/// [`RecencyList::check_invariants`](crate::ds::RecencyList::check_invariants);
/// the table variants from
/// [`LruStore::check_invariants`](crate::lru::LruStore::check_invariants),
/// which runs the list walk first. Slot numbers are arena indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantError {
    /// Exactly one of head and tail is set.
    HalfOpenEnds,
    /// Both ends are unset while the arena still holds nodes.
    OrphanedNodes { held: usize },
    /// A `next` link points at a vacant slot.
    DanglingLink { slot: usize },
    /// A node's `prev` does not name the node walked just before it.
    StalePrev { slot: usize },
    /// The walk visited more nodes than the arena holds.
    Cycle,
    /// The chain ends somewhere other than the recorded tail.
    TailMismatch { slot: usize },
    /// Fewer nodes are reachable from head than the arena holds.
    Unreachable { reached: usize, held: usize },
    /// Lookup table and recency list disagree on the entry count.
    LengthMismatch { table: usize, list: usize },
    /// More entries are stored than the capacity allows.
    OverCapacity { len: usize, capacity: usize },
    /// A table key maps to a node carrying a different key.
    KeyMismatch { slot: usize },
    /// A table key maps to a slot the list no longer occupies.
    FreedSlot { slot: usize },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::HalfOpenEnds => f.write_str("only one of head/tail is set"),
            Self::OrphanedNodes { held } => {
                write!(f, "list has no ends but arena holds {held} nodes")
            },
            Self::DanglingLink { slot } => write!(f, "dangling link to slot {slot}"),
            Self::StalePrev { slot } => write!(f, "slot {slot} has a stale prev link"),
            Self::Cycle => f.write_str("cycle detected in recency list"),
            Self::TailMismatch { slot } => {
                write!(f, "chain ends at slot {slot} but tail points elsewhere")
            },
            Self::Unreachable { reached, held } => {
                write!(f, "{reached} nodes reachable but arena holds {held}")
            },
            Self::LengthMismatch { table, list } => write!(
                f,
                "table holds {table} keys but recency list holds {list} entries"
            ),
            Self::OverCapacity { len, capacity } => {
                write!(f, "{len} entries exceed capacity {capacity}")
            },
            Self::KeyMismatch { slot } => write!(f, "slot {slot} is shared by two keys"),
            Self::FreedSlot { slot } => write!(f, "table points at freed slot {slot}"),
        }
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvalidArgument --------------------------------------------------

    #[test]
    fn invalid_argument_display_is_prefixed() {
        let err = InvalidArgument::new("capacity out of range");
        assert_eq!(err.to_string(), "invalid argument: capacity out of range");
    }

    #[test]
    fn negative_capacity_mentions_value() {
        let err = InvalidArgument::negative_capacity(-7);
        assert_eq!(err.message(), "capacity can not be negative (-7)");
    }

    #[test]
    fn invalid_argument_clone_and_eq() {
        let a = InvalidArgument::new("x");
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn invalid_argument_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<InvalidArgument>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_names_the_counts() {
        let err = InvariantError::OverCapacity {
            len: 2,
            capacity: 0,
        };
        assert_eq!(err.to_string(), "2 entries exceed capacity 0");

        let err = InvariantError::LengthMismatch { table: 3, list: 2 };
        assert_eq!(
            err.to_string(),
            "table holds 3 keys but recency list holds 2 entries"
        );
    }

    #[test]
    fn invariant_errors_compare_by_variant() {
        assert_eq!(InvariantError::Cycle, InvariantError::Cycle);
        assert_ne!(
            InvariantError::FreedSlot { slot: 1 },
            InvariantError::KeyMismatch { slot: 1 }
        );
    }
}
