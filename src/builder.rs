//! Store configuration.
//!
//! Collects construction parameters in one place and validates capacities
//! that arrive as signed integers (config files, FFI, user input) before any
//! store exists.
//!
//! ## Example
//!
//! ```rust
//! use lrustore::builder::StoreBuilder;
//!
//! let mut store = StoreBuilder::new(2).build::<u64, String>();
//! store.put(1, "hello".to_string());
//! assert_eq!(store.get(&1), Some(&"hello".to_string()));
//!
//! let shared = StoreBuilder::try_new(8).unwrap().build_shared::<u64, String>();
//! assert_eq!(shared.capacity(), 8);
//!
//! assert!(StoreBuilder::try_new(-1).is_err());
//! ```

use std::hash::Hash;

use crate::error::InvalidArgument;
use crate::lru::{DEFAULT_CAPACITY, LruStore};
use crate::shared::SharedLruStore;

/// Builder for [`LruStore`] and [`SharedLruStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreBuilder {
    capacity: usize,
}

impl StoreBuilder {
    /// Creates a builder for stores holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Fallible constructor for signed capacities.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] when `capacity` is negative.
    pub fn try_new(capacity: i64) -> Result<Self, InvalidArgument> {
        if capacity < 0 {
            return Err(InvalidArgument::negative_capacity(capacity));
        }
        Ok(Self::new(usize::try_from(capacity).unwrap_or(usize::MAX)))
    }

    /// Overrides the capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds a single-threaded store.
    pub fn build<K, V>(self) -> LruStore<K, V>
    where
        K: Eq + Hash + Clone,
    {
        LruStore::new(self.capacity)
    }

    /// Builds a thread-safe store.
    pub fn build_shared<K, V>(self) -> SharedLruStore<K, V>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        SharedLruStore::new(self.capacity)
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
