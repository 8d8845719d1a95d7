#![no_main]

use libfuzzer_sys::fuzz_target;
use lrustore::ds::RecencyList;

fn same_node(a: Option<&u32>, b: Option<&u32>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if std::ptr::eq(a, b))
}

// Fuzz arbitrary operation sequences on RecencyList
//
// Ids are kept after removal on purpose: the arena reuses slots, so stale ids
// either miss or address whichever entry now lives in that slot.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u32> = RecencyList::new();
    let mut all_ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 8;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                let id = list.push_front(value);
                all_ids.push(id);
                assert_eq!(list.iter().next(), Some(&value));
                assert_eq!(list.get(id), Some(&value));
            },
            1 => {
                let old_len = list.len();
                match list.pop_back() {
                    Some(_) => assert_eq!(list.len(), old_len - 1),
                    None => assert_eq!(old_len, 0),
                }
            },
            2 | 3 | 4 if !all_ids.is_empty() => {
                let id = all_ids[value as usize % all_ids.len()];
                match op {
                    2 => {
                        if list.move_to_front(id) {
                            assert!(same_node(list.iter().next(), list.get(id)));
                        }
                    },
                    3 => {
                        if list.move_to_back(id) {
                            assert!(same_node(list.back(), list.get(id)));
                        }
                    },
                    _ => {
                        let old_len = list.len();
                        if list.remove(id).is_some() {
                            assert_eq!(list.len(), old_len - 1);
                            assert!(list.get(id).is_none());
                        }
                    },
                }
            },
            5 => {
                assert_eq!(list.iter().count(), list.len());
            },
            6 => {
                if list.is_empty() {
                    assert_eq!(list.iter().next(), None);
                    assert_eq!(list.back(), None);
                } else {
                    assert!(list.iter().next().is_some());
                    assert!(list.back().is_some());
                }
            },
            7 => {
                list.clear();
                all_ids.clear();
                assert!(list.is_empty());
            },
            _ => {},
        }

        assert!(list.check_invariants().is_ok());
    }
});
