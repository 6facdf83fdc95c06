use log::{debug, warn};

/// Log sink that tags every pool event with the pool's label.
#[derive(Debug, Clone)]
pub struct LogManager {
    label: String,
}

impl LogManager {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn record_constructed(&self, count: usize, total: usize) {
        debug!("[{}] constructed {} element(s), {} total", self.label, count, total);
    }

    pub fn record_resize(&self, old_capacity: usize, new_capacity: usize) {
        debug!(
            "[{}] capacity grown {} -> {}",
            self.label, old_capacity, new_capacity
        );
    }

    pub fn record_overflow(&self, operation: &str, capacity: usize) {
        warn!(
            "[{}] {} rejected, pool full at capacity {}",
            self.label, operation, capacity
        );
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("pool")
    }
}
