use std::path::PathBuf;

use clap::Parser;
use popsum::config::DEFAULT_INPUT;
use popsum::{Job, JobConfig, Report, Strategy};

#[derive(Parser)]
#[command(name = "popsequential")]
struct Args {
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let job = Job::new(JobConfig {
        input: args.input,
        workers: 1,
        threads: 1,
        strategy: Strategy::Sequential,
        ..JobConfig::default()
    })?;
    let sum = job.run().await?;
    print!("{}", Report::new(job.config(), sum));

    Ok(())
}
