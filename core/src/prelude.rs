use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capacity used by `ObjectPool::default`.
pub const DEFAULT_MAX_SIZE: usize = 100;

/// How a pool constructs its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitializationMode {
    /// Every element up to capacity is built when the pool is created.
    Eager,
    /// Elements are built one at a time when the reservoir runs dry.
    Lazy,
}

impl fmt::Display for InitializationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitializationMode::Eager => f.write_str("eager"),
            InitializationMode::Lazy => f.write_str("lazy"),
        }
    }
}

impl FromStr for InitializationMode {
    type Err = PoolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "eager" => Ok(InitializationMode::Eager),
            "lazy" => Ok(InitializationMode::Lazy),
            other => Err(PoolError::Configuration(format!(
                "unknown initialization mode '{}'",
                other
            ))),
        }
    }
}

/// Lifecycle hooks the pool invokes on its elements.
///
/// Hooks only see the element itself, so they cannot reach back into the pool.
pub trait Poolable {
    /// Called once each time the element is handed out by `acquire`.
    fn on_acquire(&mut self);
    /// Called once each time the element is accepted back by `release`.
    fn on_release(&mut self);
}

/// Construction settings for a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub mode: InitializationMode,
    pub allow_resize: bool,
    pub capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            mode: InitializationMode::Eager,
            allow_resize: true,
            capacity: DEFAULT_MAX_SIZE,
        }
    }
}

impl PoolConfig {
    pub fn new(mode: InitializationMode, allow_resize: bool, capacity: usize) -> Self {
        Self {
            mode,
            allow_resize,
            capacity,
        }
    }

    pub fn validate(&self) -> PoolResult<()> {
        if self.capacity == 0 {
            return Err(PoolError::Configuration(
                "pool capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Common error type for pool operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("pool overflow at capacity {capacity}")]
    Overflow { capacity: usize },
    #[error("invalid pool configuration: {0}")]
    Configuration(String),
}

pub type PoolResult<T> = Result<T, PoolError>;
