//! Stateful result set parser
//!
//! Drives the pure mapping rules across one or more batches of a query
//! result. The parser remembers the header list and whether it has already
//! dropped the repeated header row, so a paginated result can be fed to it
//! page by page.

use crate::mapping::{build_headers, decode_rows, is_header_row};
use crate::types::{ColumnInfo, ParsedRow, ResultBatch, RowAction};
use tracing::{debug, trace};

/// Header lifecycle within a session
///
/// The only transition is `Uninitialized` → `Ready`; `reset` starts a new
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum HeaderState {
    #[default]
    Uninitialized,
    Ready(Vec<String>),
}

/// Parser turning result batches into header-keyed rows
///
/// # Examples
///
/// ```
/// use resultrows::parser::ResultSetParser;
/// use resultrows::types::{ColumnInfo, RawRow, ResultBatch};
///
/// let batch = ResultBatch::new(
///     vec![ColumnInfo::named("id"), ColumnInfo::named("name")],
///     vec![
///         ["id", "name"].into_iter().collect::<RawRow>(),
///         ["1", "Alice"].into_iter().collect(),
///     ],
/// );
///
/// let mut parser = ResultSetParser::new();
/// let rows = parser.parse(Some(&batch));
///
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].get("name"), Some("Alice"));
/// ```
///
/// # Pagination
///
/// Later pages reuse the headers of the first one, and only the first page
/// is checked for a repeated header row:
///
/// ```
/// use resultrows::parser::ResultSetParser;
/// use resultrows::types::{ColumnInfo, RawRow, ResultBatch};
///
/// let mut parser = ResultSetParser::new();
/// let first = ResultBatch::new(
///     vec![ColumnInfo::named("n")],
///     vec![["n"].into_iter().collect::<RawRow>(), ["1"].into_iter().collect()],
/// );
/// let second = ResultBatch::rows_only(vec![["2"].into_iter().collect()]);
///
/// assert_eq!(parser.parse(Some(&first)).len(), 1);
/// assert_eq!(parser.parse(Some(&second))[0].get("n"), Some("2"));
/// ```
#[derive(Debug, Clone)]
pub struct ResultSetParser {
    headers: HeaderState,
    header_row_consumed: bool,

    // Configuration
    suppress_header_row: bool,
}

impl Default for ResultSetParser {
    fn default() -> Self {
        ResultSetParser {
            headers: HeaderState::default(),
            header_row_consumed: false,
            suppress_header_row: true,
        }
    }
}

impl ResultSetParser {
    /// Create a parser with header-row suppression enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable dropping of a repeated header row (builder pattern)
    ///
    /// When disabled, the first row of the first batch is always decoded as
    /// data and `header_row_consumed()` stays false.
    pub fn suppress_header_row(mut self, suppress: bool) -> Self {
        self.suppress_header_row = suppress;
        self
    }

    /// Set headers from column metadata, once per session
    ///
    /// Does nothing if headers are already set, so a header list fixed by an
    /// earlier call is never replaced. Empty metadata leaves the parser
    /// uninitialized.
    pub fn initialize_headers(&mut self, columns: &[ColumnInfo]) {
        match self.headers {
            HeaderState::Ready(ref headers) => {
                if !columns.is_empty() {
                    trace!(
                        existing = headers.len(),
                        offered = columns.len(),
                        "headers already set, ignoring metadata"
                    );
                }
            }
            HeaderState::Uninitialized if columns.is_empty() => {}
            HeaderState::Uninitialized => {
                let headers = build_headers(columns);
                debug!(columns = headers.len(), "headers initialized");
                self.headers = HeaderState::Ready(headers);
            }
        }
    }

    /// Current headers, `None` before initialization
    pub fn headers(&self) -> Option<&[String]> {
        match self.headers {
            HeaderState::Ready(ref headers) => Some(headers),
            HeaderState::Uninitialized => None,
        }
    }

    /// Whether the repeated header row has been dropped in this session
    pub fn header_row_consumed(&self) -> bool {
        self.header_row_consumed
    }

    /// Parse one batch into header-keyed rows
    ///
    /// An absent batch, or a batch seen before any headers are known, yields
    /// no rows. Headers are taken from the batch metadata the first time it
    /// is non-empty. The first row of the first non-empty batch is dropped if
    /// it repeats the headers; later batches are never checked.
    pub fn parse(&mut self, batch: Option<&ResultBatch>) -> Vec<ParsedRow> {
        let Some(batch) = batch else {
            return Vec::new();
        };

        self.initialize_headers(batch.columns());

        let HeaderState::Ready(ref headers) = self.headers else {
            trace!("no headers yet, batch ignored");
            return Vec::new();
        };

        let mut rows = batch.raw_rows();
        if self.suppress_header_row && !self.header_row_consumed {
            if let Some(first) = rows.first() {
                if is_header_row(first, headers) {
                    debug!("header row suppressed");
                    self.header_row_consumed = true;
                    rows = &rows[1..];
                }
            }
        }

        let parsed = decode_rows(rows, headers);
        debug!(
            raw = batch.raw_rows().len(),
            parsed = parsed.len(),
            "batch parsed"
        );
        parsed
    }

    /// Parse one batch, then transform and filter each row
    ///
    /// Rows are handed to `transform` in order. `RowAction::Keep` values are
    /// collected; `RowAction::Skip` drops the row.
    ///
    /// # Examples
    ///
    /// ```
    /// use resultrows::parser::ResultSetParser;
    /// use resultrows::types::{ColumnInfo, RawRow, ResultBatch, RowAction};
    ///
    /// let batch = ResultBatch::new(
    ///     vec![ColumnInfo::named("name")],
    ///     vec![
    ///         ["Alice"].into_iter().collect::<RawRow>(),
    ///         [""].into_iter().collect(),
    ///     ],
    /// );
    ///
    /// let mut parser = ResultSetParser::new();
    /// let names: Vec<String> = parser.parse_with(Some(&batch), |row| {
    ///     match row.get("name") {
    ///         Some(name) if !name.is_empty() => RowAction::Keep(name.to_uppercase()),
    ///         _ => RowAction::Skip,
    ///     }
    /// });
    ///
    /// assert_eq!(names, vec!["ALICE"]);
    /// ```
    pub fn parse_with<T, F>(&mut self, batch: Option<&ResultBatch>, mut transform: F) -> Vec<T>
    where
        F: FnMut(ParsedRow) -> RowAction<T>,
    {
        self.parse(batch)
            .into_iter()
            .filter_map(|row| transform(row).into_option())
            .collect()
    }

    /// Parse already fetched pages of one result in order
    ///
    /// Equivalent to calling [`parse`](Self::parse) on each page and
    /// concatenating the output.
    pub fn parse_batches<'a, I>(&mut self, batches: I) -> Vec<ParsedRow>
    where
        I: IntoIterator<Item = &'a ResultBatch>,
    {
        let mut out = Vec::new();
        for batch in batches {
            out.extend(self.parse(Some(batch)));
        }
        out
    }

    /// Forget headers and re-arm header-row suppression
    ///
    /// The parser then behaves like a new one, ready for an unrelated result.
    pub fn reset(&mut self) {
        debug!("parser reset");
        self.headers = HeaderState::Uninitialized;
        self.header_row_consumed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawRow;

    fn columns(names: &[&str]) -> Vec<ColumnInfo> {
        names.iter().map(|n| ColumnInfo::named(*n)).collect()
    }

    fn row(values: &[&str]) -> RawRow {
        values.iter().copied().collect()
    }

    fn people_batch() -> ResultBatch {
        ResultBatch::new(
            columns(&["id", "name"]),
            vec![
                row(&["id", "name"]),
                row(&["1", "Alice"]),
                row(&["2", "Bob"]),
            ],
        )
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut parser = ResultSetParser::new();
        parser.initialize_headers(&columns(&["id", "name"]));
        parser.initialize_headers(&columns(&["x", "y"]));

        assert_eq!(
            parser.headers(),
            Some(&["id".to_string(), "name".to_string()][..])
        );
    }

    #[test]
    fn test_initialize_with_empty_metadata() {
        let mut parser = ResultSetParser::new();
        parser.initialize_headers(&[]);
        assert_eq!(parser.headers(), None);

        parser.initialize_headers(&columns(&["a"]));
        assert_eq!(parser.headers(), Some(&["a".to_string()][..]));
    }

    #[test]
    fn test_suppresses_header_row_once() {
        let mut parser = ResultSetParser::new();
        let rows = parser.parse(Some(&people_batch()));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), Some("1"));
        assert_eq!(rows[0].get("name"), Some("Alice"));
        assert_eq!(rows[1].get("id"), Some("2"));
        assert_eq!(rows[1].get("name"), Some("Bob"));
        assert!(parser.header_row_consumed());

        // Same session: a header-like first row is now data
        let rows = parser.parse(Some(&people_batch()));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("id"), Some("id"));
        assert_eq!(rows[0].get("name"), Some("name"));
    }

    #[test]
    fn test_first_batch_without_header_row() {
        let mut parser = ResultSetParser::new();
        let batch = ResultBatch::new(columns(&["id"]), vec![row(&["1"])]);

        assert_eq!(parser.parse(Some(&batch)).len(), 1);
        assert!(!parser.header_row_consumed());

        // Flag still armed: a later header row is dropped
        let batch = ResultBatch::rows_only(vec![row(&["id"]), row(&["2"])]);
        let rows = parser.parse(Some(&batch));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("id"), Some("2"));
        assert!(parser.header_row_consumed());
    }

    #[test]
    fn test_header_row_not_first_is_data() {
        let mut parser = ResultSetParser::new();
        let batch = ResultBatch::new(columns(&["id"]), vec![row(&["1"]), row(&["id"])]);

        let rows = parser.parse(Some(&batch));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("id"), Some("id"));
    }

    #[test]
    fn test_parse_absent_batch() {
        let mut parser = ResultSetParser::new();
        assert!(parser.parse(None).is_empty());
        assert_eq!(parser.headers(), None);
    }

    #[test]
    fn test_parse_without_metadata_or_rows() {
        let mut parser = ResultSetParser::new();
        assert!(parser.parse(Some(&ResultBatch::default())).is_empty());
        assert_eq!(parser.headers(), None);
    }

    #[test]
    fn test_rows_without_headers_are_dropped() {
        let mut parser = ResultSetParser::new();
        let batch = ResultBatch::rows_only(vec![row(&["1"])]);
        assert!(parser.parse(Some(&batch)).is_empty());
        assert!(!parser.header_row_consumed());
    }

    #[test]
    fn test_empty_rows_keep_flag_armed() {
        let mut parser = ResultSetParser::new();
        let batch = ResultBatch::new(columns(&["id"]), vec![]);
        assert!(parser.parse(Some(&batch)).is_empty());
        assert_eq!(parser.headers(), Some(&["id".to_string()][..]));
        assert!(!parser.header_row_consumed());
    }

    #[test]
    fn test_later_metadata_does_not_replace_headers() {
        let mut parser = ResultSetParser::new();
        parser.parse(Some(&people_batch()));

        let batch = ResultBatch::new(columns(&["x", "y"]), vec![row(&["3", "Carol"])]);
        let rows = parser.parse(Some(&batch));
        assert_eq!(rows[0].get("id"), Some("3"));
        assert_eq!(rows[0].get("x"), None);
        assert!(!rows[0].contains_key("x"));
    }

    #[test]
    fn test_suppression_disabled() {
        let mut parser = ResultSetParser::new().suppress_header_row(false);
        let rows = parser.parse(Some(&people_batch()));

        assert_eq!(rows.len(), 3);
        assert!(!parser.header_row_consumed());
    }

    #[test]
    fn test_parse_with_filters_in_order() {
        let batch = ResultBatch::new(
            columns(&["name"]),
            vec![row(&["Alice"]), row(&["Bob"]), row(&[""])],
        );
        let mut parser = ResultSetParser::new();
        let names = parser.parse_with(Some(&batch), |r| match r.get("name") {
            Some(n) if !n.is_empty() => RowAction::Keep(n.to_string()),
            _ => RowAction::Skip,
        });

        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_parse_with_keeps_none_values() {
        let batch = ResultBatch::new(
            columns(&["a", "b"]),
            vec![row(&["1"]), row(&["2", "x"])],
        );
        let mut parser = ResultSetParser::new();
        let seconds: Vec<Option<String>> =
            parser.parse_with(Some(&batch), |r| RowAction::Keep(r["b"].clone()));

        assert_eq!(seconds, vec![None, Some("x".to_string())]);
    }

    #[test]
    fn test_parse_with_absent_batch_never_calls_transform() {
        let mut parser = ResultSetParser::new();
        let mut calls = 0;
        let out: Vec<()> = parser.parse_with(None, |_| {
            calls += 1;
            RowAction::Keep(())
        });
        assert!(out.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_parse_batches() {
        let pages = vec![
            people_batch(),
            ResultBatch::rows_only(vec![row(&["3", "Carol"])]),
        ];
        let mut parser = ResultSetParser::new();
        let rows = parser.parse_batches(&pages);

        let ids: Vec<_> = rows.iter().filter_map(|r| r.get("id")).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_reset_starts_new_session() {
        let mut parser = ResultSetParser::new();
        parser.parse(Some(&people_batch()));
        parser.reset();

        assert_eq!(parser.headers(), None);
        assert!(!parser.header_row_consumed());

        let batch = ResultBatch::new(
            columns(&["sku"]),
            vec![row(&["sku"]), row(&["A-1"])],
        );
        let rows = parser.parse(Some(&batch));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("sku"), Some("A-1"));
        assert!(parser.header_row_consumed());
    }

    #[test]
    fn test_reset_matches_fresh_parser() {
        let mut used = ResultSetParser::new();
        used.parse(Some(&people_batch()));
        used.reset();

        let mut fresh = ResultSetParser::new();
        assert_eq!(
            used.parse(Some(&people_batch())),
            fresh.parse(Some(&people_batch()))
        );
        assert_eq!(used.headers(), fresh.headers());
    }

    #[test]
    fn test_new_parser_is_uninitialized() {
        let parser = ResultSetParser::default();
        assert_eq!(parser.headers, HeaderState::Uninitialized);
        assert_eq!(parser.headers(), None);
        assert!(!parser.header_row_consumed());
    }
}
