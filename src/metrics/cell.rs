use std::cell::Cell;

/// Counter bumped from `&self` read paths such as `peek`.
///
/// Not `Sync`: the store it lives in is either owned by one thread or sits
/// behind the mutex of a `SharedLruStore`.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get().wrapping_add(1));
    }
}
