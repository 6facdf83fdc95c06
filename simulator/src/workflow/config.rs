use crate::generator::item::DEFAULT_BUFFER_LEN;
use anyhow::{ensure, Context};
use fluxpool::{InitializationMode, PoolConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    pub pool: PoolConfig,
    pub cycles: usize,
    pub max_outstanding: usize,
    pub buffer_len: usize,
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            pool: PoolConfig::default(),
            cycles: 1000,
            max_outstanding: 150,
            buffer_len: DEFAULT_BUFFER_LEN,
            seed: 0,
        }
    }
}

impl WorkloadConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workload config {}", path_ref.display()))?;
        let config: WorkloadConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workload config {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_args(
        mode: InitializationMode,
        allow_resize: bool,
        capacity: usize,
        cycles: usize,
        max_outstanding: usize,
        seed: u64,
    ) -> Self {
        Self {
            pool: PoolConfig::new(mode, allow_resize, capacity),
            cycles,
            max_outstanding,
            seed,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.pool.validate().context("validating pool settings")?;
        ensure!(self.max_outstanding > 0, "max_outstanding must be at least 1");
        Ok(())
    }
}
