//! Pure row mapping rules: header derivation, row decoding, header-row detection
//!
//! These functions hold no state. [`ResultSetParser`](crate::parser::ResultSetParser)
//! is a thin composition over them.

mod decoder;
mod detector;
mod headers;

pub use decoder::{decode_row, decode_rows};
pub use detector::is_header_row;
pub use headers::{build_headers, placeholder_name};
