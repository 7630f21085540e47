pub mod agg;
pub mod config;
pub mod datasets;
pub mod error;
pub mod report;
mod util;

#[cfg(test)]
mod test_agg;

pub use agg::job::Job;
pub use agg::{GlobalSum, PartialSum};
pub use config::{JobConfig, Strategy};
pub use error::{Error, Result};
pub use report::Report;
