//! Database error types for quarry-db.

use quarry_core::Dimension;
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The store could not be opened or did not answer the `SELECT 1` check.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Schema creation failed.
    #[error("Schema creation failed: {0}")]
    Schema(String),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// A name has no row in its dimension (or respondent) table.
    #[error("No {dimension} row named {name:?}")]
    UnresolvedKey { dimension: String, name: String },

    /// A load referenced a dimension that did not load successfully.
    #[error("Dimension '{0}' was not loaded; dependent rows cannot be resolved")]
    DimensionNotLoaded(Dimension),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
