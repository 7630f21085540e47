use crate::util::parse_i64_lenient;

use super::FieldPair;

/// Pulls the two target columns out of a raw row.
///
/// The extractor holds configuration only. Every call splits its row with a
/// fresh iterator, so one extractor can be shared by reference between any
/// number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowExtractor {
    pub delimiter: char,
    pub domestic_col: usize,
    pub foreign_col: usize,
    pub header_marker: Option<String>,
}

impl RowExtractor {
    pub fn new(delimiter: char, domestic_col: usize, foreign_col: usize) -> Self {
        RowExtractor { delimiter, domestic_col, foreign_col, header_marker: None }
    }

    pub fn with_header_marker(mut self, marker: impl Into<String>) -> Self {
        self.header_marker = Some(marker.into());
        self
    }

    pub fn is_header(&self, row: &str) -> bool {
        self.header_marker.as_deref().is_some_and(|m| row.contains(m))
    }

    /// Returns `None` for a header row, otherwise the target fields with
    /// missing, blank or non-numeric columns read as 0.
    pub fn extract(&self, row: &str) -> Option<FieldPair> {
        if self.is_header(row) {
            return None;
        }
        let last = self.domestic_col.max(self.foreign_col);
        let mut pair = FieldPair::default();
        for (col, field) in row.split(self.delimiter).enumerate().take(last + 1) {
            if col == self.domestic_col {
                pair.domestic = parse_i64_lenient(field.trim());
            }
            if col == self.foreign_col {
                pair.foreign = parse_i64_lenient(field.trim());
            }
        }
        Some(pair)
    }
}
