//! Repeated header row detection

use crate::types::RawRow;

/// Check whether a raw row repeats the header list
///
/// True iff every cell `i` for `i` in `0..headers.len()` equals `headers[i]`
/// exactly (case-sensitive). An absent cell never equals a header. A row with
/// no cells is never a header row, even against an empty header list.
///
/// # Examples
///
/// ```
/// use resultrows::mapping::is_header_row;
/// use resultrows::types::RawRow;
///
/// let headers = vec!["id".to_string(), "name".to_string()];
/// let row: RawRow = ["id", "name"].into_iter().collect();
/// assert!(is_header_row(&row, &headers));
/// assert!(!is_header_row(&RawRow::default(), &headers));
/// ```
pub fn is_header_row(row: &RawRow, headers: &[String]) -> bool {
    if row.is_empty() {
        return false;
    }
    headers
        .iter()
        .enumerate()
        .all(|(i, header)| row.get(i) == Some(header.as_str()))
}
