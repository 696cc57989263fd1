//! Errors raised while parsing an examples table.

use thiserror::Error;

/// A malformed examples table.
///
/// Rows are never padded or truncated to fit the header; any mismatch is
/// reported with the 1-based row number (the header is row 1).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TableError {
    /// The header line has no cells.
    #[error("examples table header row has no columns")]
    MissingHeader,
    /// The header names a column twice.
    #[error("examples table header contains duplicate column '{column}'")]
    DuplicateHeader {
        /// Repeated column name.
        column: String,
    },
    /// A row has more or fewer cells than the header.
    #[error("examples table row {row_number} has {actual} cells but expected {expected}")]
    UnevenRow {
        /// 1-based index of the row, counting the header.
        row_number: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of cells in the row.
        actual: usize,
    },
}
