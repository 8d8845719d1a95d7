// ==============================================
// PROCESS-WIDE STORE TESTS (integration)
// ==============================================
//
// Exercises the global instance with heterogeneous keys and values. Tests in
// this binary share one store, so each test holds SERIAL and resets the
// store to an empty, default-capacity state first.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use lrustore::dynamic::{AnyKey, AnyValue};
use lrustore::global::{self, GlobalStore};
use lrustore::lru::DEFAULT_CAPACITY;
use parking_lot::{Mutex, MutexGuard, const_mutex};

static SERIAL: Mutex<()> = const_mutex(());

fn fresh_store() -> (MutexGuard<'static, ()>, &'static GlobalStore) {
    let guard = SERIAL.lock();
    let store = global::instance();
    store.clear();
    store.resize(DEFAULT_CAPACITY);
    (guard, store)
}

fn k<T>(key: T) -> AnyKey
where
    T: std::any::Any + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync,
{
    AnyKey::new(key)
}

fn v<T>(value: T) -> AnyValue
where
    T: std::any::Any + PartialEq + std::fmt::Debug + Send + Sync,
{
    AnyValue::new(value)
}

#[test]
fn is_singleton() {
    let (_guard, store) = fresh_store();
    assert!(std::ptr::eq(store, global::instance()));
    assert!(store.ptr_eq(global::instance()));
}

#[test]
fn basic_put_and_get() {
    let (_guard, store) = fresh_store();
    store.put(k("x"), v("xx"));
    store.put(k(true), v("false"));
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&k("x")), Some(v("xx")));
    assert_eq!(store.get(&k(true)), Some(v("false")));
}

#[test]
fn basic_put_and_remove() {
    let (_guard, store) = fresh_store();
    store.put(k("x"), v("xx"));
    store.put(k(true), v("false"));
    assert_eq!(store.len(), 2);
    assert_eq!(store.remove(&k(true)), Some(v("false")));
    assert_eq!(store.remove(&k(99)), None);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&k(true)), None);
}

#[test]
fn max_capacity() {
    let (_guard, store) = fresh_store();
    store.resize(1);
    store.put(k(1), v(11));
    store.put(k(2), v(22));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&k(1)), None);
    assert_eq!(store.get(&k(2)), Some(v(22)));
}

#[test]
fn get_refreshes_recency() {
    let (_guard, store) = fresh_store();
    store.put(k(1), v(11));
    store.put(k(2), v(22));
    store.get(&k(1));
    store.resize(1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&k(2)), None);
    assert_eq!(store.get(&k(1)), Some(v(11)));
}

#[test]
fn negative_capacity_is_rejected() {
    let (_guard, store) = fresh_store();
    store.put(k(1), v(11));
    assert!(store.try_resize(-2).is_err());
    assert_eq!(store.capacity(), DEFAULT_CAPACITY);
    assert_eq!(store.len(), 1);
}

#[test]
fn callback_on_eviction() {
    let (_guard, store) = fresh_store();
    let seen = Arc::new(AtomicI32::new(0));
    let sink = Arc::clone(&seen);
    store.put_with_callback(k(1), v(11), move |key, value| {
        assert_eq!(key.downcast_ref::<i32>(), Some(&1));
        if let Some(&n) = value.downcast_ref::<i32>() {
            sink.store(n, Ordering::SeqCst);
        }
    });
    store.remove(&k(1));
    assert_eq!(seen.load(Ordering::SeqCst), 11);
}

#[test]
fn resize_returns_evicted_oldest_first() {
    let (_guard, store) = fresh_store();
    store.put(k(1), v(11));
    store.put(k(2), v(22));
    store.put(k(3), v(33));
    assert_eq!(store.resize(1), vec![v(11), v(22)]);
    assert!(store.contains_key(&k(3)));
}

#[test]
fn heterogeneous_queries() {
    let (_guard, store) = fresh_store();
    store.put(k("x"), v(1.5f64));
    store.put(k(7u8), v(String::from("seven")));
    store.put(k(7u16), v(vec![7]));

    assert!(store.contains_key(&k(7u8)));
    assert!(!store.contains_key(&k(7u32)));
    assert!(store.contains_value(&v(String::from("seven"))));
    assert!(!store.contains_value(&v("seven")));
    assert_eq!(store.keys().len(), 3);
    assert_eq!(store.values().len(), 3);
    assert_eq!(store.entries().get(&k("x")), Some(&v(1.5f64)));
    store.check_invariants().unwrap();
}

#[test]
fn put_then_get_round_trip_keeps_size() {
    let (_guard, store) = fresh_store();
    store.put(k("a"), v(1));
    let before = store.len();
    store.put(k("b"), v(2));
    assert_eq!(store.get(&k("b")), Some(v(2)));
    assert_eq!(store.len(), before + 1);
    assert_eq!(store.put(k("b"), v(3)), Some(v(2)));
    assert_eq!(store.len(), before + 1);
}
