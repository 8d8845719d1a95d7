//! Process-wide shared store.
//!
//! [`instance`] lazily creates one [`SharedLruStore<AnyKey, AnyValue>`] with
//! [`DEFAULT_CAPACITY`] and returns the same instance for the rest of the
//! process. Initialisation goes through [`OnceLock`], so concurrent first
//! calls from several threads still produce exactly one store.
//!
//! Prefer constructing a [`SharedLruStore`] explicitly where a typed store is
//! enough; the global is for code that genuinely needs one cache per process.
//!
//! ```
//! use lrustore::dynamic::{AnyKey, AnyValue};
//! use lrustore::global;
//!
//! let store = global::instance();
//! assert!(std::ptr::eq(store, global::instance()));
//!
//! store.put(AnyKey::new("doc-global"), AnyValue::new(1u8));
//! assert!(store.contains_key(&AnyKey::new("doc-global")));
//! store.remove(&AnyKey::new("doc-global"));
//! ```

use std::sync::OnceLock;

use crate::dynamic::{AnyKey, AnyValue};
use crate::lru::DEFAULT_CAPACITY;
use crate::shared::SharedLruStore;

/// The store type behind [`instance`].
pub type GlobalStore = SharedLruStore<AnyKey, AnyValue>;

static INSTANCE: OnceLock<GlobalStore> = OnceLock::new();

/// Returns the process-wide store, creating it on first use.
pub fn instance() -> &'static GlobalStore {
    INSTANCE.get_or_init(|| {
        tracing::debug!(capacity = DEFAULT_CAPACITY, "initialising global lru store");
        SharedLruStore::new(DEFAULT_CAPACITY)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn concurrent_first_access_yields_one_instance() {
        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    instance() as *const GlobalStore as usize
                })
            })
            .collect();

        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(addresses[0], instance() as *const GlobalStore as usize);
    }
}
