//! Per-phase outcomes collected into the final run report.

use chrono::{DateTime, Utc};
use quarry_core::{CleanSummary, Dimension};
use serde::Serialize;

/// One row that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// Display name (or `respondent/value` pair) identifying the row.
    pub key: String,
    pub reason: String,
}

/// Counts for a fact or junction load phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub phase: String,
    pub attempted: usize,
    pub inserted: usize,
    /// Rows already present from an earlier run.
    pub skipped_existing: usize,
    pub failures: Vec<RowFailure>,
    /// Set when the phase could not start at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

impl PhaseReport {
    #[must_use]
    pub fn new(phase: &str) -> Self {
        Self {
            phase: phase.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn aborted(phase: &str, reason: String) -> Self {
        Self {
            aborted: Some(reason),
            ..Self::new(phase)
        }
    }

    pub(crate) fn fail(&mut self, key: impl Into<String>, reason: impl ToString) {
        self.failures.push(RowFailure {
            key: key.into(),
            reason: reason.to_string(),
        });
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.aborted.is_none() && self.failures.is_empty()
    }
}

/// Outcome of loading one dimension table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionOutcome {
    pub dimension: Dimension,
    pub distinct: usize,
    pub inserted: usize,
    pub existing: usize,
    /// Set when the dimension's transaction was rolled back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything a run did, serialized as the CLI's final output.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub source: String,
    pub cleaning: CleanSummary,
    pub dimensions: Vec<DimensionOutcome>,
    pub respondents: PhaseReport,
    pub languages: PhaseReport,
    pub communication_tools: PhaseReport,
}

impl LoadReport {
    fn phases(&self) -> [&PhaseReport; 3] {
        [&self.respondents, &self.languages, &self.communication_tools]
    }

    /// No dimension failed, no phase aborted, no row failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dimensions.iter().all(|d| d.error.is_none())
            && self.phases().iter().all(|p| p.is_clean())
    }

    /// Failed dimensions, aborted phases, and failed rows, summed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        let dims = self.dimensions.iter().filter(|d| d.error.is_some()).count();
        let phases: usize = self
            .phases()
            .iter()
            .map(|p| p.failures.len() + usize::from(p.aborted.is_some()))
            .sum();
        dims + phases
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn report() -> LoadReport {
        LoadReport {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            source: "survey.csv".into(),
            cleaning: CleanSummary::default(),
            dimensions: vec![DimensionOutcome {
                dimension: Dimension::Country,
                distinct: 2,
                inserted: 2,
                existing: 0,
                error: None,
            }],
            respondents: PhaseReport::new("respondents"),
            languages: PhaseReport::new("languages"),
            communication_tools: PhaseReport::new("communication_tools"),
        }
    }

    #[test]
    fn empty_report_is_clean() {
        let report = report();
        assert!(report.is_clean());
        assert_eq!(report.failure_count(), 0);
    }

    #[test]
    fn failures_are_counted_across_phases() {
        let mut report = report();
        report.dimensions[0].error = Some("disk full".into());
        report.respondents.fail("respondent_3", "no country row");
        report.languages = PhaseReport::aborted("languages", "respondents aborted".into());

        assert!(!report.is_clean());
        assert_eq!(report.failure_count(), 3);
    }

    #[test]
    fn serializes_snake_case_dimension_and_skips_empty_options() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["dimensions"][0]["dimension"], "country");
        assert!(json["dimensions"][0].get("error").is_none());
        assert!(json["respondents"].get("aborted").is_none());
    }
}
