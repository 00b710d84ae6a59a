//! Raw row → header-keyed record

use crate::types::{ParsedRow, RawRow};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Map one raw row onto the header list
///
/// Header `i` takes cell `i` when present, otherwise `None`. Short rows are
/// padded with `None` and cells past the last header are ignored.
///
/// # Examples
///
/// ```
/// use resultrows::mapping::decode_row;
/// use resultrows::types::RawRow;
///
/// let headers = vec!["a".to_string(), "b".to_string(), "c".to_string()];
/// let row: RawRow = ["x", "y"].into_iter().collect();
///
/// let parsed = decode_row(&row, &headers);
/// assert_eq!(parsed.get("a"), Some("x"));
/// assert_eq!(parsed.get("b"), Some("y"));
/// assert_eq!(parsed["c"], None);
/// ```
pub fn decode_row(row: &RawRow, headers: &[String]) -> ParsedRow {
    let mut parsed = ParsedRow::with_capacity(headers.len());
    for (i, header) in headers.iter().enumerate() {
        parsed.insert(header, row.get(i).map(str::to_string));
    }
    parsed
}

/// Decode a slice of rows in order
#[cfg(not(feature = "parallel"))]
pub fn decode_rows(rows: &[RawRow], headers: &[String]) -> Vec<ParsedRow> {
    rows.iter().map(|row| decode_row(row, headers)).collect()
}

/// Decode a slice of rows in order, spread over the rayon pool
#[cfg(feature = "parallel")]
pub fn decode_rows(rows: &[RawRow], headers: &[String]) -> Vec<ParsedRow> {
    rows.par_iter().map(|row| decode_row(row, headers)).collect()
}
