use std::io::Write;
use std::path::Path;

use crate::agg::job::Job;
use crate::config::{JobConfig, Strategy};
use crate::datasets::brazil_cities;
use crate::error::Error;
use crate::report::Report;
use crate::GlobalSum;

const HEADER: &str = "CITY;STATE;CAPITAL;IBGE_RESIDENTS;IBGE_RES_POP_BRAS;IBGE_RES_POP_ESTR;IBGE_DU\n";

fn input(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(contents).unwrap();
    f.flush().unwrap();
    f
}

fn config(path: &Path, workers: usize, threads: usize, strategy: Strategy) -> JobConfig {
    JobConfig {
        input: path.to_path_buf(),
        workers,
        threads,
        strategy,
        extractor: brazil_cities::extractor(),
        ..JobConfig::default()
    }
}

async fn run(path: &Path, workers: usize, threads: usize, strategy: Strategy) -> crate::Result<GlobalSum> {
    Job::new(config(path, workers, threads, strategy))?.run().await
}

/// A few hundred rows of uneven length, with blank, malformed and
/// misplaced-header rows mixed in.
fn cities() -> (Vec<u8>, i64, i64) {
    let mut out = HEADER.as_bytes().to_vec();
    let (mut domestic, mut foreign) = (0i64, 0i64);
    for i in 0..300i64 {
        let name = "x".repeat((i % 17) as usize + 1);
        let row = match i % 50 {
            7 => format!("{};MG;0;1;;{}\n", name, i),
            13 => format!("{};SP;0;1;n/a;  {} \n", name, i),
            21 => HEADER.to_string(),
            33 => format!("{};RJ\n", name),
            _ => format!("{};BA;0;{};{};{};9\n", name, i * 5, i * 11, i % 7),
        };
        match i % 50 {
            7 | 13 => foreign += i,
            21 | 33 => (),
            _ => {
                domestic += i * 11;
                foreign += i % 7;
            }
        }
        out.extend_from_slice(row.as_bytes());
    }
    (out, domestic, foreign)
}

#[tokio::test]
async fn two_rows_scenario() {
    let f = input(b"h;h;h;h;IBGE_RES_POP_BRAS;IBGE_RES_POP_ESTR\nA;B;C;D;100;10\nA;B;C;D;200;20\n");
    for workers in 1..=4 {
        for threads in 1..=3 {
            for strategy in [Strategy::Sequential, Strategy::ParallelSafe] {
                let sum = run(f.path(), workers, threads, strategy).await.unwrap();
                assert_eq!(sum.domestic_total, 300, "workers={} threads={}", workers, threads);
                assert_eq!(sum.foreign_total, 30);
                assert_eq!(sum.rows, 2);
                assert_eq!(format!("{:.4}", sum.ratio()), "10.0000");
            }
        }
    }
}

#[tokio::test]
async fn boundary_inside_second_row() {
    // payload is 37 bytes; two workers split at byte 18, inside row two
    let f = input(b"H\nA;B;C;D;100;10\nAlpha;Beta;C;D;200;20\n");
    let single = run(f.path(), 1, 1, Strategy::Sequential).await.unwrap();
    let split = run(f.path(), 2, 2, Strategy::ParallelSafe).await.unwrap();
    assert_eq!(single, split);
    assert_eq!((split.domestic_total, split.foreign_total, split.rows), (300, 30, 2));
}

#[tokio::test]
async fn worker_and_thread_count_invariance() {
    let (contents, domestic, foreign) = cities();
    let f = input(&contents);
    let reference = run(f.path(), 1, 1, Strategy::Sequential).await.unwrap();
    assert_eq!(reference.domestic_total, domestic);
    assert_eq!(reference.foreign_total, foreign);
    assert_eq!(reference.rows, 294);
    assert_eq!(reference.skipped, 6);

    for workers in [2, 3, 4, 5, 8, 13, 32, 64] {
        for threads in [1, 3] {
            let sum = run(f.path(), workers, threads, Strategy::ParallelSafe).await.unwrap();
            assert_eq!(sum, reference, "workers={} threads={}", workers, threads);
        }
    }
}

#[tokio::test]
async fn more_workers_than_rows() {
    let f = input(b"H\nA;B;C;D;100;10\n");
    for workers in [2, 5, 40] {
        let sum = run(f.path(), workers, 2, Strategy::ParallelSafe).await.unwrap();
        assert_eq!((sum.domestic_total, sum.foreign_total, sum.rows), (100, 10, 1));
    }
}

#[tokio::test]
async fn crlf_matches_lf() {
    let lf = input(b"H\nA;B;C;D;100;10\nA;B;C;D;200;20\n");
    let crlf = input(b"H\r\nA;B;C;D;100;10\r\nA;B;C;D;200;20\r\n");
    for workers in 1..=3 {
        let a = run(lf.path(), workers, 2, Strategy::ParallelSafe).await.unwrap();
        let b = run(crlf.path(), workers, 2, Strategy::ParallelSafe).await.unwrap();
        assert_eq!(a, b);
    }
}

#[tokio::test]
async fn header_only_gives_zero_totals() {
    let f = input(HEADER.as_bytes());
    let sum = run(f.path(), 3, 2, Strategy::ParallelSafe).await.unwrap();
    assert_eq!(sum, GlobalSum::default());
    assert_eq!(sum.ratio(), 0.0);
}

#[tokio::test]
async fn zero_domestic_total_has_zero_ratio() {
    let f = input(b"H\nA;B;C;D;0;10\nA;B;C;D;;20\n");
    let sum = run(f.path(), 2, 2, Strategy::ParallelSafe).await.unwrap();
    assert_eq!((sum.domestic_total, sum.foreign_total, sum.rows), (0, 30, 2));
    assert_eq!(sum.ratio(), 0.0);
    assert!(Report::new(&config(f.path(), 2, 2, Strategy::ParallelSafe), sum)
        .to_string()
        .contains("Foreign share: 0.0000%"));
}

#[tokio::test]
async fn missing_input_fails_every_worker_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("BRAZIL_CITIES.csv");
    for workers in [1, 4] {
        let err = run(&path, workers, 2, Strategy::ParallelSafe).await.unwrap_err();
        assert!(matches!(err, Error::InputUnavailable { .. }), "{:?}", err);
    }
}

#[tokio::test]
async fn empty_input_is_reported_distinctly() {
    let f = input(b"");
    for workers in [1, 4] {
        let err = run(f.path(), workers, 2, Strategy::ParallelSafe).await.unwrap_err();
        assert!(matches!(err, Error::EmptyInput { .. }), "{:?}", err);
    }
}

#[tokio::test]
async fn oversized_row_aborts_the_job() {
    let mut contents = b"H\nA;B;C;D;1;1\n".to_vec();
    contents.extend(std::iter::repeat_n(b'z', 200));
    contents.extend_from_slice(b"\nA;B;C;D;1;1\n");
    let f = input(&contents);
    for workers in [1, 3] {
        let mut cfg = config(f.path(), workers, 1, Strategy::Sequential);
        cfg.max_row_bytes = 64;
        let err = Job::new(cfg).unwrap().run().await.unwrap_err();
        assert!(matches!(err, Error::RowTooLong { limit: 64, .. }), "{:?}", err);
    }
}

#[tokio::test]
async fn largest_row_limit_still_runs() {
    let f = input(b"H\nA;B;C;D;100;10\n");
    for workers in [1, 2] {
        let mut cfg = config(f.path(), workers, 1, Strategy::Sequential);
        cfg.max_row_bytes = usize::MAX;
        let sum = Job::new(cfg).unwrap().run().await.unwrap();
        assert_eq!((sum.domestic_total, sum.foreign_total, sum.rows), (100, 10, 1));
    }
}

#[test]
fn invalid_config_is_rejected_before_running() {
    let cfg = JobConfig { workers: 0, ..JobConfig::default() };
    assert!(matches!(Job::new(cfg), Err(Error::InvalidConfig(_))));
}

#[test]
fn log_verbosity_filter_parses() {
    // the launchers' fmt::init() reads RUST_LOG through this filter
    assert!(tracing_subscriber::EnvFilter::try_new("popsum::agg=debug,info").is_ok());
}
