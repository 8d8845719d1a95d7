//! Thread-safe handle around [`LruStore`].
//!
//! ```text
//!   SharedLruStore<K, V>  (Clone = another handle to the same store)
//!        │
//!        ▼
//!   Arc<parking_lot::Mutex<LruStore<K, V>>>
//! ```
//!
//! Every operation takes the mutex once, so the lookup table and the recency
//! list are never observed mid-update. Even `get` needs exclusive access
//! because it reorders the list, which is why this is a `Mutex` rather than
//! an `RwLock`.
//!
//! Eviction callbacks run on the thread that triggered the eviction while the
//! mutex is held. A callback that calls back into the same store deadlocks.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{InvalidArgument, InvariantError};
use crate::lru::{DEFAULT_CAPACITY, LruStore};
#[cfg(feature = "metrics")]
use crate::metrics::StoreMetricsSnapshot;

/// Shared, mutex-guarded LRU store.
///
/// Values are handed out by clone; use `Arc<T>` (or [`AnyValue`](crate::dynamic::AnyValue))
/// for values that are expensive to copy.
pub struct SharedLruStore<K, V> {
    inner: Arc<Mutex<LruStore<K, V>>>,
}

impl<K, V> Clone for SharedLruStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedLruStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a shared store holding at most `capacity` entries.
    ///
    /// # Example
    ///
    /// ```
    /// use lrustore::shared::SharedLruStore;
    ///
    /// let store: SharedLruStore<u32, String> = SharedLruStore::new(100);
    /// assert_eq!(store.capacity(), 100);
    /// assert!(store.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::from_store(LruStore::new(capacity))
    }

    /// Wraps an already populated store.
    pub fn from_store(store: LruStore<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Returns a clone of the value and marks `key` most recently used.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Returns a clone of the value without touching recency.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.lock().peek(key).cloned()
    }

    /// See [`LruStore::put`].
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    /// See [`LruStore::put_with_callback`]. `on_evict` runs under the lock.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicU32, Ordering};
    /// use lrustore::shared::SharedLruStore;
    ///
    /// let store: SharedLruStore<u32, u32> = SharedLruStore::new(10);
    /// let seen = Arc::new(AtomicU32::new(0));
    /// let sink = Arc::clone(&seen);
    /// store.put_with_callback(1, 11, move |_, v| sink.store(*v, Ordering::SeqCst));
    ///
    /// assert_eq!(store.remove(&1), Some(11));
    /// assert_eq!(seen.load(Ordering::SeqCst), 11);
    /// ```
    pub fn put_with_callback<F>(&self, key: K, value: V, on_evict: F) -> Option<V>
    where
        F: FnOnce(&K, &V) + Send + 'static,
    {
        self.inner.lock().put_with_callback(key, value, on_evict)
    }

    /// Removes `key`, running its eviction callback under the lock.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Evicted values, least recently used first.
    pub fn resize(&self, capacity: usize) -> Vec<V> {
        self.inner.lock().resize(capacity)
    }

    /// # Errors
    ///
    /// Returns [`InvalidArgument`] for a negative capacity.
    pub fn try_resize(&self, capacity: i64) -> Result<Vec<V>, InvalidArgument> {
        self.inner.lock().try_resize(capacity)
    }

    /// Drops every entry without running callbacks.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Marks `key` most recently used; `false` if absent.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.lock().touch(key)
    }

    /// Clones the entry that would be evicted next.
    pub fn peek_lru(&self) -> Option<(K, V)> {
        let store = self.inner.lock();
        store.peek_lru().map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Evicts the least recently used entry, running its callback.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru()
    }

    /// Position of `key` in recency order, 0 being most recently used.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        self.inner.lock().recency_rank(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Current capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// `true` if `key` is stored; recency is untouched.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// Linear scan for `value` under the lock.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.inner.lock().contains_value(value)
    }

    /// Snapshot of the stored keys.
    pub fn keys(&self) -> FxHashSet<K> {
        self.inner.lock().keys()
    }

    /// Most recently used first.
    pub fn values(&self) -> Vec<V> {
        self.inner.lock().values()
    }

    /// Snapshot of the key/value pairs.
    pub fn entries(&self) -> FxHashMap<K, V> {
        self.inner.lock().entries()
    }

    /// Bulk insert under a single lock acquisition.
    pub fn extend<I: IntoIterator<Item = (K, V)>>(&self, iter: I) {
        self.inner.lock().extend(iter);
    }

    /// Runs `f` with exclusive access to the underlying store.
    ///
    /// Useful for compound operations that must not interleave with other
    /// threads, e.g. check-then-insert.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut LruStore<K, V>) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    /// # Errors
    ///
    /// See [`LruStore::check_invariants`].
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }

    /// `true` if both handles refer to the same store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> SharedLruStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// See [`LruStore::metrics_snapshot`].
    pub fn metrics_snapshot(&self) -> StoreMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}

impl<K, V> Default for SharedLruStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a shared store with [`DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> fmt::Debug for SharedLruStore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.inner.lock();
        f.debug_struct("SharedLruStore")
            .field("len", &store.len())
            .field("capacity", &store.capacity())
            .finish_non_exhaustive()
    }
}
