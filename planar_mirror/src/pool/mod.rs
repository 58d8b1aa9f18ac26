//! Pool module - reusable reflection instances and their lifetimes.

mod eviction;
mod reflection_pool;
mod usage_record;

pub use eviction::{EvictionQueue, EvictionTask, PooledResource};
pub use reflection_pool::{Acquired, ReflectionPool};
pub use usage_record::UsageRecord;
