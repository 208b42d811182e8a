//! Dimension phase: writes each distinct value set to its table.
//!
//! Each dimension loads in its own transaction. A failure rolls back that
//! dimension only; it is reported and left out of the returned catalog, so
//! anything depending on it is refused later instead of half-written now.

use std::collections::BTreeSet;

use quarry_core::{Dimension, DimensionSets};

use crate::StoreDb;
use crate::catalog::DimensionCatalog;
use crate::error::DatabaseError;
use crate::helpers::{dimension_table, name_column};
use crate::report::DimensionOutcome;

/// Result of the dimension phase.
#[derive(Debug)]
pub struct DimensionPhase {
    pub outcomes: Vec<DimensionOutcome>,
    pub catalog: DimensionCatalog,
}

/// Load every dimension in [`Dimension::ALL`] order.
///
/// Dimensions absent from `sets` load as empty. Values already in the table
/// are counted as `existing`.
pub async fn load_dimensions(db: &StoreDb, sets: &DimensionSets) -> DimensionPhase {
    let empty = BTreeSet::new();
    let mut catalog = DimensionCatalog::default();
    let mut outcomes = Vec::with_capacity(Dimension::ALL.len());

    for dimension in Dimension::ALL {
        let values = sets.get(&dimension).unwrap_or(&empty);
        let mut outcome = DimensionOutcome {
            dimension,
            distinct: values.len(),
            inserted: 0,
            existing: 0,
            error: None,
        };

        let loaded = match load_one(db, dimension, values).await {
            Ok(inserted) => {
                outcome.inserted = inserted;
                outcome.existing = values.len() - inserted;
                catalog.fetch(db, dimension).await
            }
            Err(e) => Err(e),
        };

        match loaded {
            Ok(()) => tracing::info!(
                dimension = %dimension,
                distinct = outcome.distinct,
                inserted = outcome.inserted,
                "dimension loaded"
            ),
            Err(e) => {
                tracing::warn!(dimension = %dimension, error = %e, "dimension load failed");
                outcome.inserted = 0;
                outcome.existing = 0;
                outcome.error = Some(e.to_string());
            }
        }
        outcomes.push(outcome);
    }

    DimensionPhase { outcomes, catalog }
}

/// Insert `values` in one transaction, returning how many were new.
async fn load_one(
    db: &StoreDb,
    dimension: Dimension,
    values: &BTreeSet<String>,
) -> Result<usize, DatabaseError> {
    let sql = format!(
        "INSERT INTO {} ({}) VALUES (?1) ON CONFLICT DO NOTHING",
        dimension_table(dimension),
        name_column(dimension)
    );

    let tx = db.conn().transaction().await?;
    let mut inserted = 0;
    for value in values {
        match tx.execute(&sql, [value.as_str()]).await {
            Ok(n) => inserted += usize::try_from(n).unwrap_or_default(),
            Err(e) => {
                tx.rollback().await.ok();
                return Err(DatabaseError::Query(format!(
                    "{}: insert {value:?}: {e}",
                    dimension_table(dimension)
                )));
            }
        }
    }
    tx.commit().await?;
    Ok(inserted)
}
