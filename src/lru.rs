//! # Least Recently Used (LRU) Store
//!
//! Bounded key/value store that evicts the least recently used entry once the
//! number of entries exceeds its capacity. Capacity can be changed at runtime;
//! shrinking evicts down to the new bound and reports what was evicted.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │                         LruStore<K, V>                             │
//!   │                                                                    │
//!   │   ┌──────────────────────────────────────────────────────────────┐ │
//!   │   │  FxHashMap<K, SlotId>  (lookup table)                        │ │
//!   │   │                                                              │ │
//!   │   │   "a" ─────────────┐   "b" ──────────┐   "c" ───────┐        │ │
//!   │   └────────────────────┼─────────────────┼──────────────┼────────┘ │
//!   │                        ▼                 ▼              ▼          │
//!   │   ┌──────────────────────────────────────────────────────────────┐ │
//!   │   │  RecencyList<Entry<K, V>>                                    │ │
//!   │   │                                                              │ │
//!   │   │  head ──► ┌──────┐ ◄──► ┌──────┐ ◄──► ┌──────┐ ◄── tail      │ │
//!   │   │   (MRU)   │ "a"  │      │ "b"  │      │ "c"  │    (LRU)      │ │
//!   │   │           │value │      │value │      │value │               │ │
//!   │   │           │on_ev │      │on_ev │      │on_ev │               │ │
//!   │   │           └──────┘      └──────┘      └──────┘               │ │
//!   │   └──────────────────────────────────────────────────────────────┘ │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method              | Complexity | Recency effect                        |
//! |---------------------|------------|---------------------------------------|
//! | `get`               | O(1)       | promotes hit to head                  |
//! | `put`               | O(1)*      | key ends at head, then evicts tail    |
//! | `remove`            | O(1)       | entry evicted (callback fires)        |
//! | `resize`            | O(evicted) | evicts tail until `len <= capacity`   |
//! | `clear`             | O(n)       | drops everything, no callbacks        |
//! | `peek` / `peek_lru` | O(1)       | none                                  |
//! | `touch`             | O(1)       | promotes to head                      |
//! | `pop_lru`           | O(1)       | evicts tail (callback fires)          |
//! | `contains_value`    | O(n)       | none                                  |
//! | `recency_rank`      | O(n)       | none                                  |
//!
//! `*` amortised over evictions.
//!
//! ## Eviction
//!
//! Every eviction path (`put` overflow, `resize`, `remove`, `pop_lru`) goes
//! through one tail-unlinking primitive and runs callbacks in a second phase.
//! All victims of an operation are unlinked from the list and dropped from
//! the table *before* the first callback runs, so the store already satisfies
//! `len <= capacity` when user code executes. A panicking callback therefore
//! cannot leave the store inconsistent; the victims whose callbacks had not
//! yet run are dropped without firing.
//!
//! ## Thread Safety
//!
//! `LruStore` is single-threaded. Wrap it in
//! [`SharedLruStore`](crate::shared::SharedLruStore) to share it across threads.

use std::fmt;
use std::hash::Hash;
use std::mem;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::ds::{RecencyList, SlotId};
use crate::error::{InvalidArgument, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{StoreMetrics, StoreMetricsSnapshot};

/// Capacity used by [`LruStore::default`] and the process-wide instance.
pub const DEFAULT_CAPACITY: usize = 99;

/// Upper bound on up-front table/arena allocation.
const MAX_PREALLOC: usize = 1 << 12;

/// Hook invoked with the key and value of an entry as it is evicted.
pub type EvictionCallback<K, V> = Box<dyn FnOnce(&K, &V) + Send>;

struct Entry<K, V> {
    key: K,
    value: V,
    on_evict: Option<EvictionCallback<K, V>>,
}

impl<K, V> Entry<K, V> {
    /// Runs the callback, if any, and hands back the entry's contents.
    ///
    /// Only called on entries already unlinked from the store.
    fn into_evicted(self) -> (K, V) {
        if let Some(on_evict) = self.on_evict {
            on_evict(&self.key, &self.value);
        }
        (self.key, self.value)
    }
}

/// Single-threaded LRU store: lookup table plus recency list.
///
/// # Example
///
/// ```
/// use lrustore::lru::LruStore;
///
/// let mut store = LruStore::new(2);
/// store.put("a", 1);
/// store.put("b", 2);
/// store.get(&"a");
/// store.put("c", 3); // evicts "b"
///
/// assert!(store.contains_key(&"a"));
/// assert!(!store.contains_key(&"b"));
/// assert_eq!(store.resize(1), vec![1]);
/// ```
pub struct LruStore<K, V> {
    table: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: StoreMetrics,
}

impl<K, V> LruStore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// A capacity of 0 is allowed: every `put` is immediately evicted.
    pub fn new(capacity: usize) -> Self {
        let prealloc = capacity.min(MAX_PREALLOC);
        Self {
            table: FxHashMap::with_capacity_and_hasher(prealloc, Default::default()),
            list: RecencyList::with_capacity(prealloc),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: StoreMetrics::default(),
        }
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.table.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Inserts or replaces `key`, returning the previous value.
    ///
    /// See [`put_with_callback`](Self::put_with_callback) for ordering.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.insert_entry(key, value, None)
    }

    /// Inserts or replaces `key` and registers `on_evict` for the new entry.
    ///
    /// An existing entry is first promoted (as by [`get`](Self::get)), then
    /// its value and callback are overwritten in place; the replaced callback
    /// is dropped without running. A new key is linked at the head. Capacity
    /// is enforced last, so with capacity 0 the entry just written is evicted
    /// and `on_evict` runs before this returns.
    ///
    /// `on_evict` runs on the calling thread. It must not call back into the
    /// same store when the store is shared: the lock is held while it runs.
    pub fn put_with_callback<F>(&mut self, key: K, value: V, on_evict: F) -> Option<V>
    where
        F: FnOnce(&K, &V) + Send + 'static,
    {
        self.insert_entry(key, value, Some(Box::new(on_evict)))
    }

    fn insert_entry(
        &mut self,
        key: K,
        value: V,
        on_evict: Option<EvictionCallback<K, V>>,
    ) -> Option<V> {
        let previous = match self.table.get(&key).copied() {
            Some(id) => {
                self.list.move_to_front(id);
                self.list.get_mut(id).map(|entry| {
                    entry.on_evict = on_evict;
                    mem::replace(&mut entry.value, value)
                })
            },
            None => {
                let id = self.list.push_front(Entry {
                    key: key.clone(),
                    value,
                    on_evict,
                });
                self.table.insert(key, id);
                None
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_put(previous.is_some());

        let victims = self.unlink_overflow();
        self.debug_validate();
        for entry in victims {
            entry.into_evicted();
        }
        previous
    }

    /// Removes `key`, running its eviction callback, and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.table.remove(key)?;
        self.list.move_to_back(id);
        let entry = self.unlink_tail()?;

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_removed_entry();
            self.record_pending_callback(&entry);
        }

        self.debug_validate();
        let (_, value) = entry.into_evicted();
        Some(value)
    }

    /// Sets a new capacity and evicts down to it.
    ///
    /// Returns the evicted values, least recently used first. Every victim
    /// leaves the store before any eviction callback runs.
    pub fn resize(&mut self, capacity: usize) -> Vec<V> {
        let previous = mem::replace(&mut self.capacity, capacity);
        let victims = self.unlink_overflow();

        #[cfg(feature = "metrics")]
        self.metrics.record_resize();

        tracing::debug!(
            from = previous,
            to = capacity,
            evicted = victims.len(),
            "resized lru store"
        );
        self.debug_validate();

        victims
            .into_iter()
            .map(|entry| entry.into_evicted().1)
            .collect()
    }

    /// Like [`resize`](Self::resize) but takes a signed capacity.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] for a negative capacity; the store is left
    /// untouched.
    pub fn try_resize(&mut self, capacity: i64) -> Result<Vec<V>, InvalidArgument> {
        if capacity < 0 {
            return Err(InvalidArgument::negative_capacity(capacity));
        }
        let capacity = usize::try_from(capacity).unwrap_or(usize::MAX);
        Ok(self.resize(capacity))
    }

    /// Drops every entry without running eviction callbacks.
    pub fn clear(&mut self) {
        let dropped = self.table.len();
        self.table.clear();
        self.list.clear();

        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        tracing::debug!(dropped, "cleared lru store");
    }

    /// Returns the value for `key` without touching recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let value = self
            .table
            .get(key)
            .and_then(|&id| self.list.get(id))
            .map(|entry| &entry.value);

        #[cfg(feature = "metrics")]
        self.metrics.record_peek(value.is_some());

        value
    }

    /// Marks `key` most recently used; returns `false` if absent.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.table.get(key) {
            Some(&id) => self.list.move_to_front(id),
            None => false,
        }
    }

    /// Returns the entry that would be evicted next.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Evicts the least recently used entry, running its callback.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.unlink_tail()?;

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_evicted_entry();
            self.record_pending_callback(&entry);
        }

        self.debug_validate();
        Some(entry.into_evicted())
    }

    /// Position of `key` in recency order, 0 being most recently used.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.table.contains_key(key) {
            return None;
        }
        self.list.iter().position(|entry| entry.key == *key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Maximum number of entries kept after any operation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` if `key` is stored; recency is untouched.
    pub fn contains_key(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    /// Linear scan; no value index is kept.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.list.iter().any(|entry| entry.value == *value)
    }

    /// Snapshot of the stored keys.
    pub fn keys(&self) -> FxHashSet<K> {
        self.table.keys().cloned().collect()
    }

    /// Snapshot of the stored values, most recently used first.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.list.iter().map(|entry| entry.value.clone()).collect()
    }

    /// Snapshot of the key/value pairs.
    pub fn entries(&self) -> FxHashMap<K, V>
    where
        V: Clone,
    {
        self.list
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    /// Borrows entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Verifies that the table and the recency list agree.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first broken invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.table.len() != self.list.len() {
            return Err(InvariantError::LengthMismatch {
                table: self.table.len(),
                list: self.list.len(),
            });
        }
        if self.table.len() > self.capacity {
            return Err(InvariantError::OverCapacity {
                len: self.table.len(),
                capacity: self.capacity,
            });
        }
        for (key, &id) in &self.table {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => return Err(InvariantError::KeyMismatch { slot: id.index() }),
                None => return Err(InvariantError::FreedSlot { slot: id.index() }),
            }
        }
        Ok(())
    }

    /// Unlinks tail entries until `len <= capacity`, least recently used
    /// first. Callbacks are left for the caller to run.
    fn unlink_overflow(&mut self) -> Vec<Entry<K, V>> {
        let mut victims = Vec::with_capacity(self.table.len().saturating_sub(self.capacity));
        while self.table.len() > self.capacity {
            let Some(entry) = self.unlink_tail() else {
                break;
            };

            #[cfg(feature = "metrics")]
            {
                self.metrics.record_evicted_entry();
                self.record_pending_callback(&entry);
            }

            victims.push(entry);
        }
        victims
    }

    /// Unlinks the tail and drops its key from the table.
    ///
    /// Every eviction path funnels through here; callbacks never run inside.
    fn unlink_tail(&mut self) -> Option<Entry<K, V>> {
        let entry = self.list.pop_back()?;
        self.table.remove(&entry.key);
        tracing::trace!(remaining = self.table.len(), "evicting tail entry");
        Some(entry)
    }

    #[cfg(feature = "metrics")]
    fn record_pending_callback(&mut self, entry: &Entry<K, V>) {
        if entry.on_evict.is_some() {
            self.metrics.record_callback();
        }
    }

    #[inline]
    fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.check_invariants() {
            panic!("lru store invariant violated: {err}");
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruStore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Copies the operation counters together with the current size.
    pub fn metrics_snapshot(&self) -> StoreMetricsSnapshot {
        self.metrics.snapshot(self.table.len(), self.capacity)
    }
}

impl<K, V> fmt::Debug for LruStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruStore")
            .field("len", &self.table.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruStore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a store with [`DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> Extend<(K, V)> for LruStore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
