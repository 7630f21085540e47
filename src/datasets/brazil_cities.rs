// BRAZIL_CITIES.csv: semicolon separated, one row per municipality.

use crate::agg::extract::RowExtractor;

pub const DELIMITER: char = ';';
/// IBGE_RES_POP_BRAS
pub const DOMESTIC_COL: usize = 4;
/// IBGE_RES_POP_ESTR
pub const FOREIGN_COL: usize = 5;
pub const HEADER_MARKER: &str = "IBGE_RES_POP_BRAS";

pub fn extractor() -> RowExtractor {
    RowExtractor::new(DELIMITER, DOMESTIC_COL, FOREIGN_COL).with_header_marker(HEADER_MARKER)
}
