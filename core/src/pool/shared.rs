use crate::pool::object_pool::ObjectPool;
use crate::prelude::{PoolError, PoolResult, Poolable};
use crate::telemetry::PoolStats;
use std::sync::{Mutex, MutexGuard};

/// Pool guarded by a single exclusive lock, for callers that share one pool
/// across threads.
#[derive(Debug)]
pub struct SharedPool<T> {
    inner: Mutex<ObjectPool<T>>,
}

impl<T: Poolable> SharedPool<T> {
    pub fn new(pool: ObjectPool<T>) -> Self {
        Self {
            inner: Mutex::new(pool),
        }
    }

    pub fn acquire(&self) -> PoolResult<T> {
        self.lock()?.acquire()
    }

    pub fn release(&self, item: T) -> PoolResult<()> {
        self.lock()?.release(item)
    }

    pub fn object_count(&self) -> PoolResult<usize> {
        Ok(self.lock()?.object_count())
    }

    pub fn max_size(&self) -> PoolResult<usize> {
        Ok(self.lock()?.max_size())
    }

    pub fn stats(&self) -> PoolResult<PoolStats> {
        Ok(self.lock()?.stats())
    }

    pub fn into_inner(self) -> PoolResult<ObjectPool<T>> {
        self.inner
            .into_inner()
            .map_err(|_| PoolError::Configuration("pool lock poisoned".into()))
    }

    fn lock(&self) -> PoolResult<MutexGuard<'_, ObjectPool<T>>> {
        self.inner
            .lock()
            .map_err(|_| PoolError::Configuration("pool lock poisoned".into()))
    }
}

impl<T: Poolable> From<ObjectPool<T>> for SharedPool<T> {
    fn from(pool: ObjectPool<T>) -> Self {
        Self::new(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::InitializationMode;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;
    use std::thread;

    #[derive(Default)]
    struct Counter {
        uses: usize,
        ready: bool,
    }

    impl Poolable for Counter {
        fn on_acquire(&mut self) {
            self.ready = true;
            self.uses += 1;
        }

        fn on_release(&mut self) {
            self.ready = false;
        }
    }

    #[test]
    fn shared_pool_serves_many_threads() {
        let pool = Arc::new(SharedPool::new(ObjectPool::<Counter>::new(
            InitializationMode::Lazy,
            false,
            4,
        )));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let item = pool.acquire().unwrap();
                        assert!(item.ready);
                        pool.release(item).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = pool.stats().unwrap();
        assert_eq!(stats.acquired, 200);
        assert_eq!(stats.released, 200);
        assert!(pool.object_count().unwrap() <= 4);
        assert_eq!(pool.max_size().unwrap(), 4);
    }

    #[test]
    fn shared_pool_surfaces_overflow() {
        let pool: SharedPool<Counter> =
            ObjectPool::<Counter>::new(InitializationMode::Eager, false, 1).into();
        let item = pool.acquire().unwrap();
        assert!(matches!(
            pool.acquire(),
            Err(PoolError::Overflow { capacity: 1 })
        ));
        pool.release(item).unwrap();

        let inner = pool.into_inner().unwrap();
        assert_eq!(inner.available(), 1);
    }

    struct Brittle;

    impl Poolable for Brittle {
        fn on_acquire(&mut self) {
            panic!("element failed to initialize");
        }

        fn on_release(&mut self) {}
    }

    fn assert_poisoned<V>(result: PoolResult<V>) {
        assert!(matches!(result, Err(PoolError::Configuration(_))));
    }

    #[test]
    fn poisoned_lock_is_reported_as_configuration_fault() {
        let pool = SharedPool::new(ObjectPool::with_factory(
            InitializationMode::Eager,
            false,
            3,
            || Brittle,
        ));

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| pool.acquire()));
        assert!(outcome.is_err());

        assert!(matches!(
            pool.acquire().map(|_| ()),
            Err(PoolError::Configuration(_))
        ));
        assert!(matches!(
            pool.release(Brittle),
            Err(PoolError::Configuration(_))
        ));
        assert_poisoned(pool.object_count());
        assert_poisoned(pool.max_size());
        assert_poisoned(pool.stats());
        assert!(matches!(
            pool.into_inner().map(|_| ()),
            Err(PoolError::Configuration(_))
        ));
    }
}
