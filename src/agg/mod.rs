use std::ops::{Add, AddAssign};

pub mod comm;
pub mod extract;
pub mod job;
pub mod local;
pub mod partition;
pub mod rows;
pub mod size;
pub mod worker;

/// The two target fields of one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldPair {
    pub domestic: i64,
    pub foreign: i64,
}

/// Where the data rows live inside the input file.
///
/// `offset` is the length of the header line and `len` the number of bytes
/// after it. Byte ranges handed to workers are relative to `offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Payload {
    pub offset: u64,
    pub len: u64,
}

/// Accumulation owned by a single worker or execution unit.
///
/// Additions wrap, so combining is associative and commutative over the
/// whole `i64` domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialSum {
    pub domestic_total: i64,
    pub foreign_total: i64,
    pub rows: u64,
    pub skipped: u64,
}

impl PartialSum {
    pub fn record(&mut self, pair: FieldPair) {
        self.domestic_total = self.domestic_total.wrapping_add(pair.domestic);
        self.foreign_total = self.foreign_total.wrapping_add(pair.foreign);
        self.rows += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }
}

impl Add for PartialSum {
    type Output = PartialSum;

    fn add(self, rhs: PartialSum) -> PartialSum {
        PartialSum {
            domestic_total: self.domestic_total.wrapping_add(rhs.domestic_total),
            foreign_total: self.foreign_total.wrapping_add(rhs.foreign_total),
            rows: self.rows + rhs.rows,
            skipped: self.skipped + rhs.skipped,
        }
    }
}

/// Combined totals, only ever materialized at the coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalSum {
    pub domestic_total: i64,
    pub foreign_total: i64,
    pub rows: u64,
    pub skipped: u64,
}

impl GlobalSum {
    /// Foreign share in percent; 0 when there is no positive domestic total.
    pub fn ratio(&self) -> f64 {
        if self.domestic_total > 0 {
            self.foreign_total as f64 / self.domestic_total as f64 * 100.0
        } else {
            0.0
        }
    }
}

impl From<PartialSum> for GlobalSum {
    fn from(p: PartialSum) -> Self {
        GlobalSum {
            domestic_total: p.domestic_total,
            foreign_total: p.foreign_total,
            rows: p.rows,
            skipped: p.skipped,
        }
    }
}

impl AddAssign<PartialSum> for GlobalSum {
    fn add_assign(&mut self, p: PartialSum) {
        self.domestic_total = self.domestic_total.wrapping_add(p.domestic_total);
        self.foreign_total = self.foreign_total.wrapping_add(p.foreign_total);
        self.rows += p.rows;
        self.skipped += p.skipped;
    }
}
