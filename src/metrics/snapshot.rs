/// Point-in-time copy of an [`LruStore`](crate::lru::LruStore)'s counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,

    pub evicted_entries: u64, // capacity overflow, resize and pop_lru
    pub removed_entries: u64,
    pub callbacks_fired: u64,
    pub resize_calls: u64,
    pub clear_calls: u64,

    pub peek_calls: u64,
    pub peek_hits: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}

impl StoreMetricsSnapshot {
    /// Fraction of `get` calls that found their key, `0.0` before any call.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_handles_no_calls() {
        assert_eq!(StoreMetricsSnapshot::default().hit_ratio(), 0.0);
    }

    #[test]
    fn hit_ratio_divides_hits_by_calls() {
        let snapshot = StoreMetricsSnapshot {
            get_calls: 4,
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert!((snapshot.hit_ratio() - 0.75).abs() < f64::EPSILON);
    }
}
