//! # quarry-core
//!
//! Core types and in-memory transformations for Quarry.
//!
//! This crate holds everything that happens before the store is touched:
//! - Record types for each stage (`RawRecord` → `CleanRecord` → `NormalizedRecord`)
//! - The `Dimension` enum naming every categorical domain
//! - The cleaner (filtering, filling, type coercion)
//! - The salary deriver
//! - The tokenizer for `;`-delimited multi-valued fields
//! - The dimension extractor (split first, then deduplicate)
//!
//! Nothing here performs I/O.

pub mod cleaner;
pub mod dimension;
pub mod errors;
pub mod extract;
pub mod records;
pub mod salary;
pub mod tokenizer;

pub use cleaner::{CleanOutcome, CleanSummary, clean};
pub use dimension::Dimension;
pub use errors::CoreError;
pub use extract::{DimensionSets, distinct_values, extract_all};
pub use records::{CleanRecord, NormalizedRecord, RawRecord, normalize};
pub use salary::SalaryPolicy;
pub use tokenizer::{Tokens, tokens};
