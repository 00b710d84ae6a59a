//! Type definitions for result batches and parsed rows

use crate::error::{Result, RowsError};
use indexmap::IndexMap;
use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Column descriptor from result set metadata
///
/// Only `name` drives header derivation. The other fields are carried so a
/// caller can inspect them, and are ignored by the row mapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColumnInfo {
    /// Display name (may be absent or empty)
    #[cfg_attr(feature = "serde", serde(alias = "Name"))]
    pub name: Option<String>,
    /// Engine type name, e.g. "varchar"
    #[cfg_attr(feature = "serde", serde(alias = "Type"))]
    pub type_name: Option<String>,
    /// Column label
    #[cfg_attr(feature = "serde", serde(alias = "Label"))]
    pub label: Option<String>,
}

impl ColumnInfo {
    /// Create a column with a display name
    pub fn named(name: impl Into<String>) -> Self {
        ColumnInfo {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create a column without a display name
    pub fn unnamed() -> Self {
        ColumnInfo::default()
    }

    /// Set the engine type name (builder pattern)
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

/// Result set metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResultMetadata {
    /// Column descriptors in result order (absent = empty)
    #[cfg_attr(feature = "serde", serde(alias = "ColumnInfo"))]
    pub columns: Vec<ColumnInfo>,
}

impl ResultMetadata {
    /// Create metadata from column descriptors
    pub fn new(columns: Vec<ColumnInfo>) -> Self {
        ResultMetadata { columns }
    }
}

/// A single raw cell. `value: None` marks an absent cell (SQL NULL or
/// an empty data marker from the result API).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawCell {
    #[cfg_attr(feature = "serde", serde(alias = "VarCharValue"))]
    pub value: Option<String>,
}

impl RawCell {
    /// Create a cell holding a value
    pub fn new(value: impl Into<String>) -> Self {
        RawCell {
            value: Some(value.into()),
        }
    }

    /// Create an absent cell
    pub fn null() -> Self {
        RawCell { value: None }
    }

    /// Get the cell value, `None` if absent
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::new(s)
    }
}

impl From<String> for RawCell {
    fn from(s: String) -> Self {
        RawCell { value: Some(s) }
    }
}

impl From<Option<&str>> for RawCell {
    fn from(value: Option<&str>) -> Self {
        RawCell {
            value: value.map(str::to_string),
        }
    }
}

/// A raw data row as delivered by the result API
///
/// Its length is independent of the column count and may be shorter or
/// longer than the header list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawRow {
    /// Cells in this row
    #[cfg_attr(feature = "serde", serde(alias = "Data"))]
    pub cells: Vec<RawCell>,
}

impl RawRow {
    /// Create a new row
    pub fn new(cells: Vec<RawCell>) -> Self {
        RawRow { cells }
    }

    /// Build a row from optional values, `None` becoming an absent cell
    ///
    /// # Examples
    ///
    /// ```
    /// use resultrows::types::RawRow;
    ///
    /// let row = RawRow::from_values([Some("1"), None, Some("Alice")]);
    /// assert_eq!(row.len(), 3);
    /// assert_eq!(row.get(1), None);
    /// ```
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        RawRow {
            cells: values.into_iter().map(RawCell::from).collect(),
        }
    }

    /// Get cell value at column index, `None` if absent or out of range
    pub fn get(&self, col: usize) -> Option<&str> {
        self.cells.get(col).and_then(RawCell::as_str)
    }

    /// Get number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if row has no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RawRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        RawRow {
            cells: iter
                .into_iter()
                .map(|s| RawCell {
                    value: Some(s.into()),
                })
                .collect(),
        }
    }
}

/// One page of query results: column metadata plus raw rows
///
/// Both parts may be absent; absence is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResultBatch {
    #[cfg_attr(feature = "serde", serde(alias = "ResultSetMetadata"))]
    pub metadata: Option<ResultMetadata>,
    #[cfg_attr(feature = "serde", serde(alias = "Rows"))]
    pub rows: Option<Vec<RawRow>>,
}

impl ResultBatch {
    /// Create a batch with metadata and rows
    pub fn new(columns: Vec<ColumnInfo>, rows: Vec<RawRow>) -> Self {
        ResultBatch {
            metadata: Some(ResultMetadata::new(columns)),
            rows: Some(rows),
        }
    }

    /// Create a batch that carries rows but no metadata, as later pages of
    /// some result APIs do
    pub fn rows_only(rows: Vec<RawRow>) -> Self {
        ResultBatch {
            metadata: None,
            rows: Some(rows),
        }
    }

    /// Replace the rows (builder pattern)
    pub fn with_rows(mut self, rows: Vec<RawRow>) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Column descriptors, empty if metadata is absent
    pub fn columns(&self) -> &[ColumnInfo] {
        self.metadata
            .as_ref()
            .map(|m| m.columns.as_slice())
            .unwrap_or(&[])
    }

    /// Raw rows, empty if absent
    pub fn raw_rows(&self) -> &[RawRow] {
        self.rows.as_deref().unwrap_or(&[])
    }
}

/// Header-keyed record for one data row
///
/// Keys follow header order. Every header key is present exactly once; a
/// missing or absent cell maps to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParsedRow {
    fields: IndexMap<String, Option<String>>,
}

impl ParsedRow {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        ParsedRow {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Set a field. A repeated key keeps its first position and takes the
    /// new value.
    pub(crate) fn insert(&mut self, key: &str, value: Option<String>) {
        match self.fields.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                self.fields.insert(key.to_string(), value);
            }
        }
    }

    /// Get the value for a column, `None` if null or not a column
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_deref())
    }

    /// Get the value for a column, failing if the column does not exist
    ///
    /// Distinguishes a null cell (`Ok(None)`) from a misspelled column.
    pub fn try_get(&self, key: &str) -> Result<Option<&str>> {
        self.fields
            .get(key)
            .map(|v| v.as_deref())
            .ok_or_else(|| RowsError::UnknownColumn(key.to_string()))
    }

    /// Check whether the row has a column with this name
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column names in header order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Values in header order
    pub fn values(&self) -> impl Iterator<Item = Option<&str>> {
        self.fields.values().map(|v| v.as_deref())
    }

    /// (column, value) pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Consume the row into its underlying ordered map
    pub fn into_inner(self) -> IndexMap<String, Option<String>> {
        self.fields
    }
}

impl Index<&str> for ParsedRow {
    type Output = Option<String>;

    /// Panics if `key` is not a column of this row
    fn index(&self, key: &str) -> &Self::Output {
        &self.fields[key]
    }
}

impl fmt::Display for ParsedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match v {
                Some(v) => write!(f, "{}: {:?}", k, v)?,
                None => write!(f, "{}: null", k)?,
            }
        }
        write!(f, "}}")
    }
}

/// Outcome of a caller-supplied row transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction<T> {
    /// Append this value to the output
    Keep(T),
    /// Drop the row
    Skip,
}

impl<T> RowAction<T> {
    /// Check if this is a skip
    pub fn is_skip(&self) -> bool {
        matches!(self, RowAction::Skip)
    }

    /// Convert into an `Option`, `Skip` becoming `None`
    pub fn into_option(self) -> Option<T> {
        match self {
            RowAction::Keep(value) => Some(value),
            RowAction::Skip => None,
        }
    }
}

/// Null-means-skip convenience: `None` is `Skip`
impl<T> From<Option<T>> for RowAction<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => RowAction::Keep(value),
            None => RowAction::Skip,
        }
    }
}
