//! Junction phase: links respondents to the labels of a multi-valued field.

use libsql::Value;

use crate::StoreDb;
use crate::catalog::{DimensionCatalog, RespondentIndex};
use crate::helpers::Junction;
use crate::report::PhaseReport;
use crate::writer::{BatchWriter, PendingRow};

/// Insert one junction row per `(display_name, label)` pair.
///
/// `pairs` is consumed lazily, so the exploded token stream is never
/// materialized. A pair whose respondent or label has no row fails on its
/// own; if the junction's dimension did not load, the phase aborts.
pub async fn load_junction<'p>(
    db: &StoreDb,
    catalog: &DimensionCatalog,
    respondents: &RespondentIndex,
    junction: Junction,
    pairs: impl IntoIterator<Item = (&'p str, &'p str)>,
    batch_size: usize,
) -> PhaseReport {
    let dimension = junction.dimension();
    if let Err(e) = catalog.require(&[dimension]) {
        tracing::warn!(phase = junction.phase(), error = %e, "junction load aborted");
        return PhaseReport::aborted(junction.phase(), e.to_string());
    }

    let mut writer = BatchWriter::new(db, junction.insert_sql(), batch_size, junction.phase());
    for (name, label) in pairs {
        let key = format!("{name}/{label}");
        let ids = respondents
            .resolve(name)
            .and_then(|r| catalog.resolve(dimension, label).map(|d| (r, d)));
        match ids {
            Ok((respondent_id, dimension_id)) => {
                writer
                    .push(PendingRow {
                        key,
                        params: vec![Value::Integer(respondent_id), Value::Integer(dimension_id)],
                    })
                    .await;
            }
            Err(e) => writer.reject(key, e),
        }
    }

    let report = writer.finish().await;
    tracing::info!(
        phase = junction.phase(),
        attempted = report.attempted,
        inserted = report.inserted,
        failed = report.failures.len(),
        "junction loaded"
    );
    report
}
