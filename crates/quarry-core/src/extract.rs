//! Distinct value sets that seed the dimension tables.
//!
//! Multi-valued fields are split before deduplication: two records with the
//! same raw string (`"Python;Go"` twice) still contribute `Python` and `Go`.

use std::collections::{BTreeMap, BTreeSet};

use crate::dimension::Dimension;
use crate::records::CleanRecord;
use crate::tokenizer::tokens;

/// Distinct values per dimension, sorted.
pub type DimensionSets = BTreeMap<Dimension, BTreeSet<String>>;

/// Distinct values of one dimension across all records.
///
/// Single-valued dimensions keep the empty string when present, since fact
/// rows reference it. Multi-valued dimensions never contain empty tokens.
pub fn distinct_values(records: &[CleanRecord], dimension: Dimension) -> BTreeSet<String> {
    let values = records.iter().map(|record| dimension.value_of(record));
    if dimension.is_multi_valued() {
        values
            .flat_map(|value| tokens((), value))
            .map(|((), token)| token.to_owned())
            .collect()
    } else {
        values.map(str::to_owned).collect()
    }
}

/// Distinct values for every dimension.
pub fn extract_all(records: &[CleanRecord]) -> DimensionSets {
    Dimension::ALL
        .into_iter()
        .map(|dimension| (dimension, distinct_values(records, dimension)))
        .collect()
}
