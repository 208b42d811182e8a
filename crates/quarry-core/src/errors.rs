//! Error types for the in-memory stages.
//!
//! Store and source errors live in their own crates (`DatabaseError`,
//! `SourceError`); the binary converges them with `anyhow`.

use thiserror::Error;

/// Errors raised while cleaning records.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A field value could not be coerced to its target type.
    ///
    /// `row` is the 1-based position of the record in the raw input.
    #[error("Row {row}: cannot coerce {field} value {value:?} to {target}")]
    Coercion {
        row: usize,
        field: &'static str,
        value: String,
        target: &'static str,
    },
}
