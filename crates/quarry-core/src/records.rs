//! Record types for each pipeline stage.

use serde::{Deserialize, Serialize};

use crate::salary::SalaryPolicy;

/// Prefix of the surrogate display name given to each respondent.
pub const DISPLAY_NAME_PREFIX: &str = "respondent_";

/// One input row as read from the source file. `None` means missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub respondent: Option<String>,
    pub hobby: Option<String>,
    pub open_source: Option<String>,
    pub country: Option<String>,
    pub company_size: Option<String>,
    pub converted_salary: Option<String>,
    pub communication_tools: Option<String>,
    pub operating_system: Option<String>,
    pub languages: Option<String>,
}

/// A raw record after filtering and coercion.
///
/// `country` is never empty; the categorical and multi-valued fields are
/// `""` when the source had no value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub respondent: String,
    pub hobby: i64,
    pub open_source: i64,
    pub country: String,
    pub company_size: String,
    pub converted_salary: f64,
    pub communication_tools: String,
    pub operating_system: String,
    pub languages: String,
}

/// A clean record ready for the fact table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// `respondent_<n>`, 1-based in row order.
    pub display_name: String,
    /// Monthly salary in local currency, two decimals.
    pub monthly_salary: f64,
    pub record: CleanRecord,
}

/// Assign display names and derive monthly salaries, preserving row order.
#[must_use]
pub fn normalize(records: Vec<CleanRecord>, policy: SalaryPolicy) -> Vec<NormalizedRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| NormalizedRecord {
            display_name: format!("{DISPLAY_NAME_PREFIX}{}", idx + 1),
            monthly_salary: policy.monthly(record.converted_salary),
            record,
        })
        .collect()
}
