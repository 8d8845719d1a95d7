//! lrustore: a bounded in-memory LRU key/value store.
//!
//! - [`lru::LruStore`]: single-threaded core, a lookup table kept in lockstep
//!   with a recency list.
//! - [`shared::SharedLruStore`]: the same store behind one mutex.
//! - [`global::instance`]: the process-wide store over type-erased
//!   [`dynamic::AnyKey`] / [`dynamic::AnyValue`].
//!
//! Capacity can be changed at runtime with `resize`, which evicts down to
//! the new bound and returns the evicted values oldest first. Entries may
//! carry an eviction callback that fires when they leave the store through
//! eviction or `remove` (but not `clear`).

pub mod builder;
pub mod ds;
pub mod dynamic;
pub mod error;
pub mod global;
pub mod lru;
pub mod prelude;
pub mod shared;

#[cfg(feature = "metrics")]
pub mod metrics;
