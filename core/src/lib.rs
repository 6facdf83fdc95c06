//! Reusable-object pool with eager or lazy initialization.
//!
//! Elements are built once, lent out through `acquire`, reset through
//! `release`, and reused. A resizable pool doubles its capacity when it runs
//! dry; otherwise exhaustion surfaces as `PoolError::Overflow`.

pub mod pool;
pub mod prelude;
pub mod telemetry;

pub use pool::{ObjectPool, SharedPool};
pub use prelude::{
    InitializationMode, PoolConfig, PoolError, PoolResult, Poolable, DEFAULT_MAX_SIZE,
};
pub use telemetry::PoolStats;
