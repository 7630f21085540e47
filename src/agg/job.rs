use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;

use crate::config::JobConfig;
use crate::error::{Error, Result};

use super::GlobalSum;
use super::comm;
use super::worker::Worker;

pub struct Job {
    config: Arc<JobConfig>,
}

impl Job {
    pub fn new(config: JobConfig) -> Result<Self> {
        config.validate()?;
        Ok(Job { config: Arc::new(config) })
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Runs every worker to completion and returns the coordinator's total.
    ///
    /// The first failure aborts all remaining workers. Peers that only saw
    /// the job collapse report [`Error::Aborted`], which is returned only if
    /// no worker reported the underlying cause.
    pub async fn run(&self) -> Result<GlobalSum> {
        let started = Instant::now();
        log::info!(
            "Job starting: {} worker(s) x {} thread(s), strategy {}, input {}",
            self.config.workers, self.config.threads, self.config.strategy, self.config.input.display()
        );

        let mut workers = JoinSet::new();
        for endpoint in comm::group(self.config.workers) {
            workers.spawn(Worker::new(endpoint, self.config.clone()).run());
        }

        let mut total = None;
        let mut aborted = false;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(Some(sum))) => total = Some(sum),
                Ok(Ok(None)) => (),
                Ok(Err(Error::Aborted)) => aborted = true,
                Ok(Err(e)) => {
                    log::warn!("Job failed: {}, aborting remaining workers", e);
                    workers.abort_all();
                    return Err(e);
                }
                Err(e) if e.is_cancelled() => aborted = true,
                Err(e) => {
                    workers.abort_all();
                    return Err(Error::WorkerLost(e.to_string()));
                }
            }
        }

        match total {
            Some(total) if !aborted => {
                log::info!("Job finished in {:?}: {} rows", started.elapsed(), total.rows);
                Ok(total)
            }
            _ => Err(Error::Aborted),
        }
    }
}
