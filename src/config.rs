use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::agg::extract::RowExtractor;
use crate::datasets;
use crate::error::{Error, Result};

pub const DEFAULT_INPUT: &str = "BRAZIL_CITIES.csv";
pub const DEFAULT_MAX_ROW_BYTES: usize = 64 * 1024;

/// How a worker spreads its rows over execution units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Plain fold on one thread.
    Sequential,
    /// Static slices over a thread pool, private sums merged at the end.
    #[default]
    ParallelSafe,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" | "sequential" => Ok(Strategy::Sequential),
            "parallel-safe" | "parallel" => Ok(Strategy::ParallelSafe),
            "parallel-unsafe" => Err(Error::RejectedStrategy(s.to_string())),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Sequential => "none",
            Strategy::ParallelSafe => "parallel-safe",
        })
    }
}

#[derive(Debug, Clone)]
pub struct JobConfig {
    pub input: PathBuf,
    pub workers: usize,
    /// Execution units per worker.
    pub threads: usize,
    pub strategy: Strategy,
    pub extractor: RowExtractor,
    pub max_row_bytes: usize,
}

impl Default for JobConfig {
    fn default() -> Self {
        JobConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            workers: 1,
            threads: default_threads(),
            strategy: Strategy::default(),
            extractor: datasets::brazil_cities::extractor(),
            max_row_bytes: DEFAULT_MAX_ROW_BYTES,
        }
    }
}

impl JobConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("at least one worker is required".to_string()));
        }
        if self.threads == 0 {
            return Err(Error::InvalidConfig("at least one thread per worker is required".to_string()));
        }
        if self.max_row_bytes == 0 {
            return Err(Error::InvalidConfig("max row size must be positive".to_string()));
        }
        Ok(())
    }
}

pub fn default_threads() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}
