/// Half-open `[start, end)` interval of payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Range of worker `rank` out of `n` over a payload of `len` bytes.
    /// The last worker takes the division remainder.
    pub fn for_worker(len: u64, n: usize, rank: usize) -> ByteRange {
        assert!(n > 0 && rank < n, "rank {} out of {} workers", rank, n);
        let chunk = len / n as u64;
        let start = rank as u64 * chunk;
        let end = if rank == n - 1 { len } else { start + chunk };
        ByteRange { start, end }
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

pub fn partition(len: u64, n: usize) -> Vec<ByteRange> {
    (0..n).map(|rank| ByteRange::for_worker(len, n, rank)).collect()
}
