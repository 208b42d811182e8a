//! Source reader error types.

/// Errors that can occur while reading the survey file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// `DuckDB` operation failed.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// The source file does not exist.
    #[error("Source file not found: {0}")]
    NotFound(String),

    /// A required column is absent from the header row.
    #[error("Source file {path} is missing required column '{column}'")]
    MissingColumn {
        /// Path of the file that was read.
        path: String,
        /// Name of the missing column.
        column: &'static str,
    },
}
