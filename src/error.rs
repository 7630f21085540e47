use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open input {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input {} is empty (no header line)", path.display())]
    EmptyInput { path: PathBuf },

    #[error("worker#{worker}: out of memory after buffering {buffered} rows")]
    AllocationFailure { worker: usize, buffered: usize },

    #[error("row at payload offset {offset} exceeds {limit} bytes")]
    RowTooLong { offset: u64, limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot start execution units: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("strategy {0:?} is rejected: it shares parse state across execution units")]
    RejectedStrategy(String),

    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("unknown dataset: {0}")]
    UnknownDataset(String),

    #[error("collective misuse: {0}")]
    Collective(&'static str),

    #[error("job aborted by a failing peer")]
    Aborted,

    #[error("worker lost: {0}")]
    WorkerLost(String),
}

pub type Result<T> = std::result::Result<T, Error>;
