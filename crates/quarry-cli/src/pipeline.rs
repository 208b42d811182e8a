//! The full load, phase by phase:
//! read → clean → extract → connect → schema → dimensions → respondents → junctions.
//!
//! Errors returned from here are fatal. Dimension, phase, and row failures
//! are recorded in the [`LoadReport`] instead.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use quarry_config::QuarryConfig;
use quarry_core::{NormalizedRecord, SalaryPolicy, clean, extract_all, normalize, tokens};
use quarry_db::StoreDb;
use quarry_db::catalog::{DimensionCatalog, RespondentIndex};
use quarry_db::dimensions::load_dimensions;
use quarry_db::facts::load_respondents;
use quarry_db::helpers::Junction;
use quarry_db::junctions::load_junction;
use quarry_db::report::{LoadReport, PhaseReport};
use quarry_source::SurveyReader;

use crate::progress::Progress;

pub async fn run(config: &QuarryConfig, show_progress: bool) -> anyhow::Result<LoadReport> {
    let started_at = Utc::now();
    let source = &config.source.path;

    let spinner = Progress::spinner(show_progress, "Reading survey source");
    let raw = SurveyReader::open(&config.source)
        .and_then(|reader| reader.read(Path::new(source)))
        .with_context(|| format!("failed to read survey source {source}"));
    let raw = finish(&spinner, raw, |r| format!("Read {} rows", r.len()))?;

    let outcome = clean(raw).context("failed to clean survey records")?;
    tracing::info!(
        input = outcome.summary.input_rows,
        dropped = outcome.summary.dropped_missing_country,
        kept = outcome.summary.kept_rows,
        "records cleaned"
    );
    let sets = extract_all(&outcome.records);

    let spinner = Progress::spinner(show_progress, "Preparing store");
    let db = prepare_store(config).await;
    let db = finish(&spinner, db, |_| "Store ready".to_owned())?;

    let spinner = Progress::spinner(show_progress, "Loading dimensions");
    let dims = load_dimensions(&db, &sets).await;
    spinner.finish_ok(&format!(
        "Loaded {} dimension tables",
        dims.outcomes.iter().filter(|o| o.error.is_none()).count()
    ));

    let normalized = normalize(
        outcome.records,
        SalaryPolicy::new(config.pipeline.exchange_rate),
    );
    let batch_size = config.pipeline.batch_size;

    let spinner = Progress::spinner(show_progress, "Loading respondents");
    let facts = load_respondents(&db, &dims.catalog, &normalized, batch_size).await;
    let facts = finish(&spinner, facts, |f| {
        format!("Inserted {} respondents", f.report.inserted)
    })?;

    let (languages, communication_tools) = match &facts.index {
        Some(index) => {
            let spinner = Progress::spinner(show_progress, "Linking languages and tools");
            let languages = link(
                &db,
                &dims.catalog,
                index,
                Junction::Language,
                &normalized,
                batch_size,
            )
            .await;
            let tools = link(
                &db,
                &dims.catalog,
                index,
                Junction::CommunicationTool,
                &normalized,
                batch_size,
            )
            .await;
            spinner.finish_ok(&format!(
                "Linked {} languages, {} tools",
                languages.inserted, tools.inserted
            ));
            (languages, tools)
        }
        None => {
            let reason = "respondent phase aborted".to_owned();
            (
                PhaseReport::aborted(Junction::Language.phase(), reason.clone()),
                PhaseReport::aborted(Junction::CommunicationTool.phase(), reason),
            )
        }
    };

    Ok(LoadReport {
        started_at,
        finished_at: Utc::now(),
        source: source.clone(),
        cleaning: outcome.summary,
        dimensions: dims.outcomes,
        respondents: facts.report,
        languages,
        communication_tools,
    })
}

async fn prepare_store(config: &QuarryConfig) -> anyhow::Result<StoreDb> {
    let db = StoreDb::connect(&config.store)
        .await
        .context("failed to connect to store")?;
    db.ensure_schema()
        .await
        .context("failed to create survey schema")?;
    Ok(db)
}

/// Feed the junction loader the lazy token stream of one multi-valued field.
async fn link(
    db: &StoreDb,
    catalog: &DimensionCatalog,
    index: &RespondentIndex,
    junction: Junction,
    records: &[NormalizedRecord],
    batch_size: usize,
) -> PhaseReport {
    let pairs = records.iter().flat_map(|r| {
        let field = match junction {
            Junction::Language => &r.record.languages,
            Junction::CommunicationTool => &r.record.communication_tools,
        };
        tokens(r.display_name.as_str(), field)
    });
    load_junction(db, catalog, index, junction, pairs, batch_size).await
}

fn finish<T, E>(
    spinner: &Progress,
    result: Result<T, E>,
    message: impl FnOnce(&T) -> String,
) -> Result<T, E> {
    match &result {
        Ok(value) => spinner.finish_ok(&message(value)),
        Err(_) => spinner.finish_err("failed"),
    }
    result
}
