use rayon::prelude::*;

use crate::config::Strategy;
use crate::error::Result;

use super::PartialSum;
use super::extract::RowExtractor;

fn fold_rows(rows: &[String], extractor: &RowExtractor) -> PartialSum {
    rows.iter().fold(PartialSum::default(), |mut acc, row| {
        match extractor.extract(row) {
            Some(pair) => acc.record(pair),
            None => acc.record_skipped(),
        }
        acc
    })
}

/// Reduces one worker's buffered rows to its partial sum.
///
/// With [`Strategy::ParallelSafe`] the rows are cut into `threads` static
/// slices, each folded on its own pool thread into a private sum; the private
/// sums are added once every slice is done.
pub fn aggregate(rows: &[String], extractor: &RowExtractor, strategy: Strategy, threads: usize) -> Result<PartialSum> {
    match strategy {
        Strategy::Sequential => Ok(fold_rows(rows, extractor)),
        Strategy::ParallelSafe => {
            let threads = threads.max(1);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("popsum-unit-{}", i))
                .build()?;
            let slice_len = rows.len().div_ceil(threads).max(1);
            let sum = pool.install(|| {
                rows.par_chunks(slice_len)
                    .map(|slice| fold_rows(slice, extractor))
                    .reduce(PartialSum::default, |a, b| a + b)
            });
            Ok(sum)
        }
    }
}
