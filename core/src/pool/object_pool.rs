use crate::prelude::{
    InitializationMode, PoolConfig, PoolError, PoolResult, Poolable, DEFAULT_MAX_SIZE,
};
use crate::telemetry::{LogManager, PoolMetrics, PoolStats};
use std::fmt;

type Factory<T> = Box<dyn Fn() -> T + Send>;

/// Reservoir of reusable elements that are lent out and handed back.
///
/// Elements are never destroyed while the pool lives: they cycle between the
/// reservoir and the caller. Capacity starts at the configured size and
/// doubles whenever a resizable pool runs dry.
pub struct ObjectPool<T> {
    reservoir: Vec<T>,
    constructed: usize,
    capacity: usize,
    mode: InitializationMode,
    allow_resize: bool,
    factory: Factory<T>,
    metrics: PoolMetrics,
    logger: LogManager,
}

impl<T: Poolable> ObjectPool<T> {
    /// Creates a pool that builds elements with `T::default()`.
    pub fn new(mode: InitializationMode, allow_resize: bool, capacity: usize) -> Self
    where
        T: Default + 'static,
    {
        Self::with_factory(mode, allow_resize, capacity, T::default)
    }

    /// Creates a pool that builds elements with the supplied factory.
    pub fn with_factory<F>(
        mode: InitializationMode,
        allow_resize: bool,
        capacity: usize,
        factory: F,
    ) -> Self
    where
        F: Fn() -> T + Send + 'static,
    {
        let mut pool = Self {
            reservoir: Vec::new(),
            constructed: 0,
            capacity,
            mode,
            allow_resize,
            factory: Box::new(factory),
            metrics: PoolMetrics::new(),
            logger: LogManager::default(),
        };

        if mode == InitializationMode::Eager {
            pool.reservoir.reserve_exact(capacity);
            pool.construct(capacity);
        }
        pool
    }

    /// Validates `config` and builds a pool from it.
    pub fn from_config(config: &PoolConfig) -> PoolResult<Self>
    where
        T: Default + 'static,
    {
        config.validate()?;
        Ok(Self::new(config.mode, config.allow_resize, config.capacity))
    }

    /// Replaces the label used to tag this pool's log records.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.logger = LogManager::new(label);
        self
    }

    /// Hands out an element, constructing or growing when the reservoir is empty.
    pub fn acquire(&mut self) -> PoolResult<T> {
        if self.reservoir.is_empty() {
            self.replenish()?;
        }
        self.retrieve()
    }

    /// Returns an element to the reservoir.
    ///
    /// Fails when the reservoir already holds `max_size` elements; the
    /// rejected element is dropped and the pool is left untouched.
    pub fn release(&mut self, mut item: T) -> PoolResult<()> {
        if self.reservoir.len() >= self.capacity {
            return Err(self.overflow("release"));
        }

        item.on_release();
        self.reservoir.push(item);
        self.metrics.record_released();
        Ok(())
    }

    /// Number of elements constructed so far.
    pub fn object_count(&self) -> usize {
        self.constructed
    }

    /// Current capacity.
    pub fn max_size(&self) -> usize {
        self.capacity
    }

    /// Number of elements waiting in the reservoir.
    pub fn available(&self) -> usize {
        self.reservoir.len()
    }

    pub fn mode(&self) -> InitializationMode {
        self.mode
    }

    pub fn allow_resize(&self) -> bool {
        self.allow_resize
    }

    pub fn label(&self) -> &str {
        self.logger.label()
    }

    pub fn stats(&self) -> PoolStats {
        self.metrics.snapshot(self.reservoir.len(), self.capacity)
    }

    // Eager pools backfill to the new capacity on growth, lazy pools only
    // build the one element about to be handed out.
    fn replenish(&mut self) -> PoolResult<()> {
        match self.mode {
            InitializationMode::Eager => {
                if !self.allow_resize {
                    return Err(self.overflow("acquire"));
                }
                self.grow()?;
                let missing = self.capacity - self.constructed;
                self.construct(missing);
            }
            InitializationMode::Lazy => {
                if self.constructed >= self.capacity {
                    if !self.allow_resize {
                        return Err(self.overflow("acquire"));
                    }
                    self.grow()?;
                }
                self.construct(1);
            }
        }
        Ok(())
    }

    fn retrieve(&mut self) -> PoolResult<T> {
        let mut item = self.reservoir.pop().ok_or_else(|| {
            PoolError::Configuration(format!(
                "reservoir of '{}' empty after replenish",
                self.logger.label()
            ))
        })?;
        item.on_acquire();
        self.metrics.record_acquired();
        Ok(item)
    }

    fn construct(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        for _ in 0..count {
            self.reservoir.push((self.factory)());
        }
        self.constructed += count;
        self.metrics.record_constructed(count);
        self.logger.record_constructed(count, self.constructed);
    }

    fn grow(&mut self) -> PoolResult<()> {
        let new_capacity = match self.capacity.checked_mul(2) {
            Some(doubled) => doubled.max(1),
            None => return Err(self.overflow("resize")),
        };
        self.logger.record_resize(self.capacity, new_capacity);
        self.capacity = new_capacity;
        self.metrics.record_resize();
        Ok(())
    }

    fn overflow(&mut self, operation: &str) -> PoolError {
        self.metrics.record_overflow();
        self.logger.record_overflow(operation, self.capacity);
        PoolError::Overflow {
            capacity: self.capacity,
        }
    }
}

impl<T: Poolable + Default + 'static> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new(InitializationMode::Eager, true, DEFAULT_MAX_SIZE)
    }
}

impl<T> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("label", &self.logger.label())
            .field("mode", &self.mode)
            .field("allow_resize", &self.allow_resize)
            .field("capacity", &self.capacity)
            .field("constructed", &self.constructed)
            .field("available", &self.reservoir.len())
            .finish()
    }
}
