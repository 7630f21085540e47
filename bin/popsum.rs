use std::path::PathBuf;

use clap::Parser;
use popsum::config::{DEFAULT_INPUT, DEFAULT_MAX_ROW_BYTES, default_threads};
use popsum::datasets::get_dataset;
use popsum::{Job, JobConfig, Report, Strategy};

#[derive(Parser)]
#[command(name = "popsum")]
struct Args {
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// Number of cooperating workers
    #[arg(short, long, default_value_t = 1)]
    workers: usize,
    /// Execution units per worker
    #[arg(short, long, default_value_t = default_threads())]
    threads: usize,
    /// none | parallel-safe
    #[arg(short, long, default_value_t = Strategy::ParallelSafe)]
    strategy: Strategy,
    #[arg(short, long, default_value = "brazil-cities")]
    dataset: String,
    #[arg(long, default_value_t = DEFAULT_MAX_ROW_BYTES)]
    max_row_bytes: usize,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let job = Job::new(JobConfig {
        input: args.input,
        workers: args.workers,
        threads: args.threads,
        strategy: args.strategy,
        extractor: get_dataset(&args.dataset)?,
        max_row_bytes: args.max_row_bytes,
    })?;
    let sum = job.run().await?;
    print!("{}", Report::new(job.config(), sum));

    Ok(())
}
