use serde::{Deserialize, Serialize};

/// Lifetime counters for a single pool.
#[derive(Debug, Clone, Default)]
pub struct PoolMetrics {
    acquired: usize,
    released: usize,
    constructed: usize,
    resizes: usize,
    overflows: usize,
}

/// Point-in-time view of a pool, suitable for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolStats {
    pub acquired: usize,
    pub released: usize,
    pub constructed: usize,
    pub resizes: usize,
    pub overflows: usize,
    pub available: usize,
    pub max_size: usize,
}

impl PoolStats {
    /// Elements currently lent out, assuming every release was a genuine return.
    pub fn outstanding(&self) -> usize {
        self.constructed.saturating_sub(self.available)
    }
}

impl PoolMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_acquired(&mut self) {
        self.acquired += 1;
    }

    pub fn record_released(&mut self) {
        self.released += 1;
    }

    pub fn record_constructed(&mut self, count: usize) {
        self.constructed += count;
    }

    pub fn record_resize(&mut self) {
        self.resizes += 1;
    }

    pub fn record_overflow(&mut self) {
        self.overflows += 1;
    }

    pub fn snapshot(&self, available: usize, max_size: usize) -> PoolStats {
        PoolStats {
            acquired: self.acquired,
            released: self.released,
            constructed: self.constructed,
            resizes: self.resizes,
            overflows: self.overflows,
            available,
            max_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_events() {
        let mut metrics = PoolMetrics::new();
        metrics.record_constructed(4);
        metrics.record_acquired();
        metrics.record_acquired();
        metrics.record_released();
        metrics.record_resize();
        metrics.record_overflow();

        let stats = metrics.snapshot(3, 8);
        assert_eq!(stats.acquired, 2);
        assert_eq!(stats.released, 1);
        assert_eq!(stats.constructed, 4);
        assert_eq!(stats.resizes, 1);
        assert_eq!(stats.overflows, 1);
        assert_eq!(stats.outstanding(), 1);
    }

    #[test]
    fn stats_serialize_to_json() {
        let stats = PoolMetrics::new().snapshot(0, 10);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["max_size"], 10);
        assert_eq!(json["overflows"], 0);
    }
}
