//! Operation counters for [`LruStore`](crate::lru::LruStore).
//!
//! Enabled by the `metrics` cargo feature. Counters are plain integers
//! mutated under the same `&mut` borrow (or mutex) as the store itself, so
//! recording never adds synchronisation. Read-only paths that only hold
//! `&self` use [`MetricsCell`].

pub mod cell;
pub mod snapshot;

pub use cell::MetricsCell;
pub use snapshot::StoreMetricsSnapshot;

#[derive(Debug, Default)]
pub(crate) struct StoreMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,
    pub evicted_entries: u64,
    pub removed_entries: u64,
    pub callbacks_fired: u64,
    pub resize_calls: u64,
    pub clear_calls: u64,
    pub peek_calls: MetricsCell,
    pub peek_hits: MetricsCell,
}

impl StoreMetrics {
    #[inline]
    pub fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    #[inline]
    pub fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    #[inline]
    pub fn record_put(&mut self, updated: bool) {
        self.put_calls += 1;
        if updated {
            self.put_updates += 1;
        } else {
            self.put_new += 1;
        }
    }

    #[inline]
    pub fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    #[inline]
    pub fn record_removed_entry(&mut self) {
        self.removed_entries += 1;
    }

    #[inline]
    pub fn record_callback(&mut self) {
        self.callbacks_fired += 1;
    }

    #[inline]
    pub fn record_resize(&mut self) {
        self.resize_calls += 1;
    }

    #[inline]
    pub fn record_clear(&mut self) {
        self.clear_calls += 1;
    }

    #[inline]
    pub fn record_peek(&self, hit: bool) {
        self.peek_calls.incr();
        if hit {
            self.peek_hits.incr();
        }
    }

    pub fn snapshot(&self, len: usize, capacity: usize) -> StoreMetricsSnapshot {
        StoreMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            put_calls: self.put_calls,
            put_updates: self.put_updates,
            put_new: self.put_new,
            evicted_entries: self.evicted_entries,
            removed_entries: self.removed_entries,
            callbacks_fired: self.callbacks_fired,
            resize_calls: self.resize_calls,
            clear_calls: self.clear_calls,
            peek_calls: self.peek_calls.get(),
            peek_hits: self.peek_hits.get(),
            len,
            capacity,
        }
    }
}
