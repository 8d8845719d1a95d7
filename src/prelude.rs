pub use crate::builder::StoreBuilder;
pub use crate::dynamic::{AnyKey, AnyValue};
pub use crate::error::{InvalidArgument, InvariantError};
pub use crate::global::{GlobalStore, instance};
pub use crate::lru::{DEFAULT_CAPACITY, EvictionCallback, LruStore};
#[cfg(feature = "metrics")]
pub use crate::metrics::StoreMetricsSnapshot;
pub use crate::shared::SharedLruStore;
