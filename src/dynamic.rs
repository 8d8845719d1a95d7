//! Type-erased keys and values for the process-wide store.
//!
//! A single global store has to accept keys and values of any type at once
//! (`"x"`, `true` and `99` side by side). [`AnyKey`] and [`AnyValue`] wrap
//! such values behind an `Arc<dyn ...>` and implement equality by comparing
//! the concrete type first and the value second, so `1u32` and `1u64` are
//! different keys.
//!
//! ```
//! use lrustore::dynamic::{AnyKey, AnyValue};
//!
//! let key = AnyKey::new("x");
//! assert_eq!(key, AnyKey::new("x"));
//! assert_ne!(AnyKey::new(1u32), AnyKey::new(1u64));
//!
//! let value = AnyValue::new(String::from("xx"));
//! assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("xx"));
//! assert!(value.downcast_ref::<&str>().is_none());
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Object-safe equality over erased values.
pub trait DynValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    /// `true` if `other` has the same concrete type and compares equal.
    fn dyn_eq(&self, other: &dyn Any) -> bool;
}

impl<T> DynValue for T
where
    T: Any + PartialEq + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }
}

/// Object-safe hashing on top of [`DynValue`], for keys.
pub trait DynKey: DynValue {
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T> DynKey for T
where
    T: Any + Eq + Hash + fmt::Debug + Send + Sync,
{
    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}

/// Any `Eq + Hash` value usable as a store key.
#[derive(Clone)]
pub struct AnyKey(Arc<dyn DynKey>);

impl AnyKey {
    pub fn new<T>(key: T) -> Self
    where
        T: Any + Eq + Hash + fmt::Debug + Send + Sync,
    {
        Self(Arc::new(key))
    }

    /// Borrows the inner value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref()
    }

    fn type_id_of_inner(&self) -> TypeId {
        self.0.as_any().type_id()
    }
}

impl PartialEq for AnyKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_any())
    }
}

impl Eq for AnyKey {}

impl Hash for AnyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id_of_inner().hash(state);
        self.0.dyn_hash(state);
    }
}

impl fmt::Debug for AnyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Any `PartialEq` value storable in the process-wide store.
///
/// Cloning shares the underlying allocation.
#[derive(Clone)]
pub struct AnyValue(Arc<dyn DynValue>);

impl AnyValue {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + PartialEq + fmt::Debug + Send + Sync,
    {
        Self(Arc::new(value))
    }

    /// Borrows the inner value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref()
    }
}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_any())
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
