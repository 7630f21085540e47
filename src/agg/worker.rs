use std::collections::TryReserveError;
use std::sync::Arc;

use tokio_stream::{Stream, StreamExt};

use crate::config::JobConfig;
use crate::error::{Error, Result};

use super::comm::Endpoint;
use super::local::aggregate;
use super::partition::ByteRange;
use super::rows::rows_in_range;
use super::{GlobalSum, PartialSum, Payload, size};

pub struct Worker {
    endpoint: Endpoint,
    config: Arc<JobConfig>,
}

impl Worker {
    pub fn new(endpoint: Endpoint, config: Arc<JobConfig>) -> Self {
        Worker { endpoint, config }
    }

    /// Runs this worker's share of the job. Only the coordinator returns the
    /// global sum.
    pub async fn run(mut self) -> Result<Option<GlobalSum>> {
        let rank = self.endpoint.rank();
        let discovered = if self.endpoint.is_coordinator() {
            Some(size::discover(&self.config.input, self.config.max_row_bytes).await?)
        } else {
            None
        };
        let payload = self.endpoint.broadcast(discovered).await?;

        let range = ByteRange::for_worker(payload.len, self.endpoint.size(), rank);
        log::debug!("Worker#{} owns bytes [{}, {})", rank, range.start, range.end);

        let rows = buffer_rows(&self.config, rank, payload, range).await?;
        log::debug!("Worker#{} buffered {} rows", rank, rows.len());

        let partial = aggregate_blocking(self.config.clone(), rows).await?;
        log::info!(
            "Worker#{} partial sum: domestic={} foreign={} rows={} skipped={}",
            rank, partial.domestic_total, partial.foreign_total, partial.rows, partial.skipped
        );

        self.endpoint.reduce(partial).await
    }
}

async fn buffer_rows(config: &JobConfig, rank: usize, payload: Payload, range: ByteRange) -> Result<Vec<String>> {
    let rows = rows_in_range(config.input.clone(), payload, rank, range, config.max_row_bytes);
    collect_rows(rows, rank, |buffered| buffered.try_reserve(1)).await
}

/// Drains `rows` into an owned buffer, growing it through `reserve`. On a
/// failed reservation the rows buffered so far are released before the
/// error is returned.
async fn collect_rows<S, F>(rows: S, rank: usize, mut reserve: F) -> Result<Vec<String>>
where
    S: Stream<Item = Result<String>>,
    F: FnMut(&mut Vec<String>) -> std::result::Result<(), TryReserveError>,
{
    tokio::pin!(rows);
    let mut buffered = Vec::new();
    while let Some(row) = rows.next().await {
        let row = row?;
        if reserve(&mut buffered).is_err() {
            let count = buffered.len();
            drop(buffered);
            return Err(Error::AllocationFailure { worker: rank, buffered: count });
        }
        buffered.push(row);
    }
    Ok(buffered)
}

async fn aggregate_blocking(config: Arc<JobConfig>, rows: Vec<String>) -> Result<PartialSum> {
    tokio::task::spawn_blocking(move || {
        aggregate(&rows, &config.extractor, config.strategy, config.threads)
    })
    .await
    .map_err(|e| Error::WorkerLost(e.to_string()))?
}
