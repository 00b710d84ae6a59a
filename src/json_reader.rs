//! Loading result batches from JSON
//!
//! Accepts two layouts:
//!
//! - the crate's own shape: `{"metadata": {"columns": [{"name": ..}]}, "rows": [{"cells": [{"value": ..}]}]}`
//! - the Athena `GetQueryResults` result set shape:
//!   `{"ResultSetMetadata": {"ColumnInfo": [{"Name": ..}]}, "Rows": [{"Data": [{"VarCharValue": ..}]}]}`
//!
//! Either may also arrive wrapped in a response envelope,
//! `{"ResultSet": {..}, "NextToken": ..}`, as `GetQueryResults` returns it.
//!
//! Missing objects or fields are treated as absent, matching the parser's
//! total handling of incomplete input.

use crate::error::Result;
use crate::types::ResultBatch;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// A batch, either bare or inside a query response envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum BatchDocument {
    Envelope {
        #[serde(alias = "ResultSet")]
        result_set: ResultBatch,
    },
    Bare(ResultBatch),
}

impl From<BatchDocument> for ResultBatch {
    fn from(doc: BatchDocument) -> Self {
        match doc {
            BatchDocument::Envelope { result_set } => result_set,
            BatchDocument::Bare(batch) => batch,
        }
    }
}

impl ResultBatch {
    /// Decode a batch from a JSON string
    ///
    /// # Examples
    ///
    /// ```
    /// use resultrows::types::ResultBatch;
    ///
    /// let batch = ResultBatch::from_json_str(
    ///     r#"{"ResultSetMetadata": {"ColumnInfo": [{"Name": "id"}]},
    ///         "Rows": [{"Data": [{"VarCharValue": "id"}]}, {"Data": [{}]}]}"#,
    /// )?;
    ///
    /// assert_eq!(batch.columns()[0].name.as_deref(), Some("id"));
    /// assert_eq!(batch.raw_rows()[1].get(0), None);
    /// # Ok::<(), resultrows::RowsError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: BatchDocument = serde_json::from_str(json)?;
        Ok(doc.into())
    }

    /// Decode a batch from any reader producing JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: BatchDocument = serde_json::from_reader(reader)?;
        Ok(doc.into())
    }

    /// Read and decode a batch from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let batch = Self::from_reader(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            columns = batch.columns().len(),
            rows = batch.raw_rows().len(),
            "batch loaded"
        );
        Ok(batch)
    }
}
