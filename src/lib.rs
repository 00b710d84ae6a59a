//! # resultrows
//!
//! Turn tabular query results (column metadata plus raw rows whose cells may
//! be absent) into header-keyed records.
//!
//! - Headers come from column names, with `col_<index>` for unnamed columns
//! - Short rows are padded with nulls, extra cells are ignored
//! - A header row repeated as the first data row is dropped once per session
//! - Rows can be transformed and filtered in the same pass
//!
//! ## Quick Start
//!
//! ```
//! use resultrows::{ColumnInfo, RawRow, ResultBatch, ResultSetParser, RowAction};
//!
//! let page = ResultBatch::new(
//!     vec![ColumnInfo::named("id"), ColumnInfo::named("name")],
//!     vec![
//!         ["id", "name"].into_iter().collect::<RawRow>(),
//!         ["1", "Alice"].into_iter().collect(),
//!         ["2", "Bob"].into_iter().collect(),
//!     ],
//! );
//!
//! let mut parser = ResultSetParser::new();
//! let ids: Vec<u32> = parser.parse_with(Some(&page), |row| {
//!     RowAction::from(row.get("id").and_then(|id| id.parse::<u32>().ok()))
//! });
//!
//! assert_eq!(ids, vec![1, 2]);
//! ```
//!
//! The pure rules are also available without a parser, see [`mapping`].
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the data model
//! - `json` (default): load batches with [`ResultBatch::from_json_str`] and friends
//! - `parallel`: decode rows on the rayon thread pool

pub mod error;
#[cfg(feature = "json")]
pub mod json_reader;
pub mod mapping;
pub mod parser;
pub mod types;

pub use error::{Result, RowsError};
pub use mapping::{build_headers, decode_row, is_header_row};
pub use parser::ResultSetParser;
pub use types::{ColumnInfo, ParsedRow, RawCell, RawRow, ResultBatch, ResultMetadata, RowAction};
