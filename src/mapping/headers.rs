//! Header derivation from column metadata

use crate::types::ColumnInfo;

/// Prefix of synthesized names for columns without a display name
const PLACEHOLDER_PREFIX: &str = "col_";

/// Positional placeholder for the column at `index` (0-based)
pub fn placeholder_name(index: usize) -> String {
    format!("{}{}", PLACEHOLDER_PREFIX, index)
}

/// Derive the header list from column metadata
///
/// One header per column, same order. A column whose name is absent or empty
/// gets the placeholder `col_<index>`.
///
/// # Examples
///
/// ```
/// use resultrows::mapping::build_headers;
/// use resultrows::types::ColumnInfo;
///
/// let columns = vec![ColumnInfo::unnamed(), ColumnInfo::named("b"), ColumnInfo::unnamed()];
/// assert_eq!(build_headers(&columns), vec!["col_0", "b", "col_2"]);
/// ```
pub fn build_headers(columns: &[ColumnInfo]) -> Vec<String> {
    columns
        .iter()
        .enumerate()
        .map(|(i, col)| match col.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => placeholder_name(i),
        })
        .collect()
}
