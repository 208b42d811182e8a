//! Respondent phase: one fact row per normalized record.

use libsql::Value;
use quarry_core::{Dimension, NormalizedRecord};

use crate::StoreDb;
use crate::catalog::{DimensionCatalog, RespondentIndex};
use crate::error::DatabaseError;
use crate::report::PhaseReport;
use crate::writer::{BatchWriter, PendingRow};

pub const PHASE: &str = "respondents";

const INSERT_RESPONDENT: &str = "INSERT INTO respondente
    (nome, contrib_open_source, programa_hobby, salario,
     sistema_operacional_id, pais_id, empresa_id)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    ON CONFLICT DO NOTHING";

/// Result of the respondent phase.
#[derive(Debug)]
pub struct RespondentPhase {
    pub report: PhaseReport,
    /// `None` when the phase aborted before writing anything.
    pub index: Option<RespondentIndex>,
}

/// Insert one respondent per record, resolving its three dimension ids
/// through `catalog`.
///
/// If any of [`Dimension::FACT_KEYS`] failed to load, nothing is written and
/// the report is marked aborted. A record whose value has no dimension row
/// fails on its own.
///
/// # Errors
///
/// Returns [`DatabaseError`] only if the respondent index cannot be read back
/// after loading.
pub async fn load_respondents(
    db: &StoreDb,
    catalog: &DimensionCatalog,
    records: &[NormalizedRecord],
    batch_size: usize,
) -> Result<RespondentPhase, DatabaseError> {
    if let Err(e) = catalog.require(&Dimension::FACT_KEYS) {
        tracing::warn!(error = %e, "respondent load aborted");
        return Ok(RespondentPhase {
            report: PhaseReport::aborted(PHASE, e.to_string()),
            index: None,
        });
    }

    let mut writer = BatchWriter::new(db, INSERT_RESPONDENT, batch_size, PHASE);
    for record in records {
        match respondent_params(catalog, record) {
            Ok(params) => {
                writer
                    .push(PendingRow {
                        key: record.display_name.clone(),
                        params,
                    })
                    .await;
            }
            Err(e) => writer.reject(record.display_name.as_str(), e),
        }
    }
    let report = writer.finish().await;

    let index = RespondentIndex::fetch(db).await?;
    tracing::info!(
        attempted = report.attempted,
        inserted = report.inserted,
        failed = report.failures.len(),
        "respondents loaded"
    );
    Ok(RespondentPhase {
        report,
        index: Some(index),
    })
}

fn respondent_params(
    catalog: &DimensionCatalog,
    record: &NormalizedRecord,
) -> Result<Vec<Value>, DatabaseError> {
    let clean = &record.record;
    let os = catalog.resolve(Dimension::OperatingSystem, &clean.operating_system)?;
    let country = catalog.resolve(Dimension::Country, &clean.country)?;
    let company = catalog.resolve(Dimension::CompanySize, &clean.company_size)?;
    Ok(vec![
        Value::Text(record.display_name.clone()),
        Value::Integer(clean.open_source),
        Value::Integer(clean.hobby),
        Value::Real(record.monthly_salary),
        Value::Integer(os),
        Value::Integer(country),
        Value::Integer(company),
    ])
}
