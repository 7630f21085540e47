use std::fmt;
use std::path::PathBuf;

use crate::agg::GlobalSum;
use crate::config::{JobConfig, Strategy};

pub struct Report {
    pub input: PathBuf,
    pub workers: usize,
    pub threads: usize,
    pub strategy: Strategy,
    pub sum: GlobalSum,
}

impl Report {
    pub fn new(config: &JobConfig, sum: GlobalSum) -> Self {
        let threads = match config.strategy {
            Strategy::Sequential => 1,
            Strategy::ParallelSafe => config.threads,
        };
        Report {
            input: config.input.clone(),
            workers: config.workers,
            threads,
            strategy: config.strategy,
            sum,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!(
            "=========== FINAL RESULTS ({} workers x {} threads, {}) ===========",
            self.workers, self.threads, self.strategy
        );
        writeln!(f)?;
        writeln!(f, "{}", title)?;
        writeln!(f, "Input file: {}", self.input.display())?;
        writeln!(f, "Rows processed: {}", self.sum.rows)?;
        writeln!(f, "Domestic resident population total: {}", self.sum.domestic_total)?;
        writeln!(f, "Foreign resident population total: {}", self.sum.foreign_total)?;
        writeln!(f, "Foreign share: {:.4}%", self.sum.ratio())?;
        writeln!(f, "{}", "=".repeat(title.chars().count()))
    }
}
