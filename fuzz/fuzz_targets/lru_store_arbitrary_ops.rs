#![no_main]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use libfuzzer_sys::fuzz_target;
use lrustore::lru::LruStore;

// Fuzz arbitrary operation sequences on LruStore
//
// Every insert registers a callback; at the end the number of fired callbacks
// must equal the number of entries that left the store through eviction or
// removal.
fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let mut store: LruStore<u8, u16> = LruStore::new(usize::from(first % 32));
    let fired = Arc::new(AtomicUsize::new(0));
    let mut departed = 0usize;

    for pair in rest.chunks_exact(2) {
        let key = pair[1];
        let before = store.len();
        match pair[0] % 8 {
            0 | 1 => {
                let fired = Arc::clone(&fired);
                let existed = store.contains_key(&key);
                store.put_with_callback(key, u16::from(key) * 3, move |_, _| {
                    fired.fetch_add(1, Ordering::Relaxed);
                });
                let grew = usize::from(!existed);
                departed += before + grew - store.len();
                if store.capacity() > 0 {
                    assert_eq!(store.get(&key), Some(&(u16::from(key) * 3)));
                }
            },
            2 => {
                if let Some(value) = store.get(&key) {
                    assert_eq!(*value, u16::from(key) * 3);
                    assert_eq!(store.recency_rank(&key), Some(0));
                }
            },
            3 => {
                if store.remove(&key).is_some() {
                    departed += 1;
                    assert!(!store.contains_key(&key));
                }
            },
            4 => {
                let evicted = store.resize(usize::from(key % 32));
                departed += evicted.len();
                assert!(store.len() <= store.capacity());
            },
            5 => {
                if store.pop_lru().is_some() {
                    departed += 1;
                }
            },
            6 => {
                let _ = store.peek(&key);
                let _ = store.peek_lru();
                assert_eq!(store.keys().len(), store.len());
                assert_eq!(store.values().len(), store.len());
            },
            _ => {
                if store.touch(&key) {
                    assert_eq!(store.recency_rank(&key), Some(0));
                }
            },
        }

        assert!(store.len() <= store.capacity());
        assert!(store.check_invariants().is_ok());
    }

    assert_eq!(fired.load(Ordering::Relaxed), departed);
});
