//! Fatal errors. Data anomalies are reported through [`crate::anomaly`] instead.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A row cannot be assigned to any trip. `row` is the 0-based data row index.
    #[error("data row {} is missing its {field} grouping field", .row + 1)]
    MissingGroupKey { row: usize, field: &'static str },

    /// A data row has more fields than the header. `row` is the 0-based data row index.
    #[error("data row {} has {found} fields but the header has {expected}", .row + 1)]
    RowTooLong { row: usize, found: usize, expected: usize },

    #[error("required column '{0}' not found")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
