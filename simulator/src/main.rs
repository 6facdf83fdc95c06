use anyhow::Context;
use clap::Parser;
use fluxpool::InitializationMode;
use std::fs;
use std::path::PathBuf;
use workflow::config::WorkloadConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline workload driver for fluxpool")]
struct Args {
    /// Load a workload config from YAML
    #[arg(long)]
    workload: Option<PathBuf>,
    /// Initialization mode: eager or lazy
    #[arg(long, default_value = "eager")]
    mode: InitializationMode,
    #[arg(long, default_value_t = 100)]
    capacity: usize,
    /// Double capacity when the pool runs dry; `false` surfaces overflows instead
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    allow_resize: bool,
    #[arg(long, default_value_t = 1000)]
    cycles: usize,
    #[arg(long, default_value_t = 150)]
    max_outstanding: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write the JSON summary to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workload_config = if let Some(path) = args.workload {
        WorkloadConfig::load(path)?
    } else {
        WorkloadConfig::from_args(
            args.mode,
            args.allow_resize,
            args.capacity,
            args.cycles,
            args.max_outstanding,
            args.seed,
        )
    };

    let runner = Runner::new(workload_config.clone());
    let result = runner.execute().context("running workload")?;

    println!(
        "Workload ({} mode) -> steps {}, objects {}, max_size {}, peak {}, outstanding {}, acquire overflows {}, release overflows {}",
        workload_config.pool.mode,
        result.steps,
        result.object_count,
        result.max_size,
        result.peak_outstanding,
        result.stats.outstanding(),
        result.acquire_overflows,
        result.release_overflows
    );

    if let Some(report_path) = args.report {
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let report = serde_json::to_string_pretty(&result).context("serializing report")?;
        fs::write(&report_path, report)
            .with_context(|| format!("writing report {}", report_path.display()))?;
    }

    Ok(())
}
