use crate::generator::item::ScratchBuffer;
use crate::generator::schedule::{build_schedule, Operation};
use crate::workflow::config::WorkloadConfig;
use anyhow::Context;
use fluxpool::{ObjectPool, PoolError, PoolStats};
use log::{debug, info};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WorkloadResult {
    pub steps: usize,
    pub acquire_overflows: usize,
    pub release_overflows: usize,
    pub peak_outstanding: usize,
    /// Acquisitions served by a previously used buffer.
    pub reuses: usize,
    pub object_count: usize,
    pub max_size: usize,
    pub stats: PoolStats,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkloadConfig,
}

impl Runner {
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<WorkloadResult> {
        self.config.validate()?;

        let pool_config = &self.config.pool;
        let buffer_len = self.config.buffer_len;
        let mut pool = ObjectPool::with_factory(
            pool_config.mode,
            pool_config.allow_resize,
            pool_config.capacity,
            move || ScratchBuffer::with_length(buffer_len),
        )
        .with_label("simulator");

        let schedule = build_schedule(
            self.config.cycles,
            self.config.max_outstanding,
            self.config.seed,
        );
        info!(
            "replaying {} operations against a {} pool of capacity {}",
            schedule.len(),
            pool.mode(),
            pool.max_size()
        );

        let mut held: Vec<ScratchBuffer> = Vec::new();
        let mut acquire_overflows = 0;
        let mut release_overflows = 0;
        let mut peak_outstanding = 0;
        let mut reuses = 0;

        for (step, operation) in schedule.iter().enumerate() {
            match operation {
                Operation::Acquire => match pool.acquire() {
                    Ok(mut buffer) => {
                        if buffer.generation() > 1 {
                            reuses += 1;
                        }
                        buffer.samples_mut().fill(step as f32);
                        held.push(buffer);
                        peak_outstanding = peak_outstanding.max(held.len());
                    }
                    Err(PoolError::Overflow { capacity }) => {
                        debug!("step {}: acquire overflow at capacity {}", step, capacity);
                        acquire_overflows += 1;
                    }
                    Err(err) => {
                        return Err(err).with_context(|| format!("acquiring at step {}", step))
                    }
                },
                Operation::Release => {
                    if let Some(buffer) = held.pop() {
                        release_overflows += release(&mut pool, buffer, step)?;
                    }
                }
            }
        }

        let drained = held.len();
        for buffer in held.drain(..) {
            release_overflows += release(&mut pool, buffer, schedule.len())?;
        }
        debug!("returned {} outstanding buffers after replay", drained);

        Ok(WorkloadResult {
            steps: schedule.len(),
            acquire_overflows,
            release_overflows,
            peak_outstanding,
            reuses,
            object_count: pool.object_count(),
            max_size: pool.max_size(),
            stats: pool.stats(),
        })
    }
}

fn release(
    pool: &mut ObjectPool<ScratchBuffer>,
    buffer: ScratchBuffer,
    step: usize,
) -> anyhow::Result<usize> {
    match pool.release(buffer) {
        Ok(()) => Ok(0),
        Err(PoolError::Overflow { .. }) => Ok(1),
        Err(err) => Err(err).with_context(|| format!("releasing at step {}", step)),
    }
}
