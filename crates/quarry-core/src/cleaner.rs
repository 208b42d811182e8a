//! Raw record cleaning: filtering, filling, and type coercion.
//!
//! Rules, applied per record in input order:
//! 1. Records without a country are dropped.
//! 2. Languages, communication tools, operating system and company size:
//!    empty means missing, and missing becomes `""`.
//! 3. Hobby and open-source flags map `"Yes"` → `1`, `"No"` → `0`.
//!    Anything else (including a missing value) fails the whole step.
//! 4. A missing salary becomes `"0.0"`, then the text is parsed as `f64`.

use serde::Serialize;

use crate::errors::CoreError;
use crate::records::{CleanRecord, RawRecord};

/// Salary text used when the source has no value.
const MISSING_SALARY: &str = "0.0";

/// Row counts for one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    pub input_rows: usize,
    pub dropped_missing_country: usize,
    pub kept_rows: usize,
}

/// Cleaned records plus the counts that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutcome {
    pub records: Vec<CleanRecord>,
    pub summary: CleanSummary,
}

/// Clean every raw record.
///
/// # Errors
///
/// Returns [`CoreError::Coercion`] for the first flag or salary value that
/// cannot be coerced. No partial result is returned.
pub fn clean(raw: Vec<RawRecord>) -> Result<CleanOutcome, CoreError> {
    let input_rows = raw.len();
    let mut records = Vec::with_capacity(input_rows);

    for (idx, record) in raw.into_iter().enumerate() {
        if let Some(clean) = clean_one(idx + 1, record)? {
            records.push(clean);
        }
    }

    let summary = CleanSummary {
        input_rows,
        dropped_missing_country: input_rows - records.len(),
        kept_rows: records.len(),
    };
    Ok(CleanOutcome { records, summary })
}

fn clean_one(row: usize, raw: RawRecord) -> Result<Option<CleanRecord>, CoreError> {
    let Some(country) = non_empty(raw.country) else {
        return Ok(None);
    };

    Ok(Some(CleanRecord {
        respondent: raw.respondent.unwrap_or_default(),
        hobby: coerce_flag(row, "Hobby", raw.hobby.as_deref())?,
        open_source: coerce_flag(row, "OpenSource", raw.open_source.as_deref())?,
        country,
        company_size: fill_empty(raw.company_size),
        converted_salary: coerce_salary(row, raw.converted_salary.as_deref())?,
        communication_tools: fill_empty(raw.communication_tools),
        operating_system: fill_empty(raw.operating_system),
        languages: fill_empty(raw.languages),
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn fill_empty(value: Option<String>) -> String {
    non_empty(value).unwrap_or_default()
}

fn coerce_flag(row: usize, field: &'static str, value: Option<&str>) -> Result<i64, CoreError> {
    match value {
        Some("Yes") => Ok(1),
        Some("No") => Ok(0),
        other => Err(CoreError::Coercion {
            row,
            field,
            value: other.unwrap_or("<missing>").to_owned(),
            target: "integer flag",
        }),
    }
}

/// A `NaN` literal counts as a missing salary; infinities are rejected.
fn coerce_salary(row: usize, value: Option<&str>) -> Result<f64, CoreError> {
    let text = value.unwrap_or(MISSING_SALARY);
    let reject = || CoreError::Coercion {
        row,
        field: "ConvertedSalary",
        value: text.to_owned(),
        target: "finite float",
    };
    let salary = text.trim().parse::<f64>().map_err(|_| reject())?;
    if salary.is_nan() {
        return Ok(0.0);
    }
    if salary.is_infinite() {
        return Err(reject());
    }
    Ok(salary)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn raw(country: Option<&str>) -> RawRecord {
        RawRecord {
            respondent: Some("1".into()),
            hobby: Some("Yes".into()),
            open_source: Some("No".into()),
            country: country.map(Into::into),
            company_size: Some("20 to 99 employees".into()),
            converted_salary: Some("60000.0".into()),
            communication_tools: Some("Slack;Jira".into()),
            operating_system: Some("Linux-based".into()),
            languages: Some("Rust;Python".into()),
        }
    }

    #[test]
    fn coerces_a_complete_record() {
        let out = clean(vec![raw(Some("Brazil"))]).unwrap();
        assert_eq!(
            out.records,
            vec![CleanRecord {
                respondent: "1".into(),
                hobby: 1,
                open_source: 0,
                country: "Brazil".into(),
                company_size: "20 to 99 employees".into(),
                converted_salary: 60000.0,
                communication_tools: "Slack;Jira".into(),
                operating_system: "Linux-based".into(),
                languages: "Rust;Python".into(),
            }]
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn drops_records_without_country(#[case] country: Option<&str>) {
        let out = clean(vec![raw(country), raw(Some("Peru"))]).unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].country, "Peru");
        assert_eq!(
            out.summary,
            CleanSummary {
                input_rows: 2,
                dropped_missing_country: 1,
                kept_rows: 1,
            }
        );
    }

    #[test]
    fn fills_missing_categorical_fields_with_empty_string() {
        let mut record = raw(Some("Chile"));
        record.company_size = None;
        record.operating_system = Some(String::new());
        record.languages = None;
        record.communication_tools = Some(String::new());

        let out = clean(vec![record]).unwrap();
        let clean = &out.records[0];
        assert_eq!(clean.company_size, "");
        assert_eq!(clean.operating_system, "");
        assert_eq!(clean.languages, "");
        assert_eq!(clean.communication_tools, "");
    }

    #[test]
    fn missing_salary_becomes_zero() {
        let mut record = raw(Some("Chile"));
        record.converted_salary = None;
        let out = clean(vec![record]).unwrap();
        assert!(out.records[0].converted_salary.abs() < f64::EPSILON);
    }

    #[rstest]
    #[case("NaN")]
    #[case("nan")]
    #[case(" -NaN ")]
    fn nan_salary_counts_as_missing(#[case] value: &str) {
        let mut record = raw(Some("Chile"));
        record.converted_salary = Some(value.into());
        let out = clean(vec![record]).unwrap();
        assert!(out.records[0].converted_salary.abs() < f64::EPSILON);
    }

    #[rstest]
    #[case("inf")]
    #[case("-infinity")]
    #[case("Infinity")]
    fn rejects_infinite_salary(#[case] value: &str) {
        let mut record = raw(Some("Chile"));
        record.converted_salary = Some(value.into());
        let err = clean(vec![record]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Coercion { row: 1, field: "ConvertedSalary", target: "finite float", .. }
        ));
    }

    #[rstest]
    #[case(Some("Yes"), 1)]
    #[case(Some("No"), 0)]
    fn maps_yes_no_flags(#[case] value: Option<&str>, #[case] expected: i64) {
        assert_eq!(coerce_flag(1, "Hobby", value).unwrap(), expected);
    }

    #[rstest]
    #[case(Some("yes"))]
    #[case(Some("Maybe"))]
    #[case(Some("1"))]
    #[case(None)]
    fn rejects_other_flag_literals(#[case] value: Option<&str>) {
        let err = coerce_flag(4, "OpenSource", value).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Coercion { row: 4, field: "OpenSource", .. }
        ));
    }

    #[test]
    fn flag_failure_fails_the_whole_step() {
        let mut bad = raw(Some("Chile"));
        bad.hobby = Some("Sometimes".into());
        let err = clean(vec![raw(Some("Peru")), bad]).unwrap_err();
        assert_eq!(
            err,
            CoreError::Coercion {
                row: 2,
                field: "Hobby",
                value: "Sometimes".into(),
                target: "integer flag",
            }
        );
    }

    #[test]
    fn flags_are_not_checked_on_dropped_rows() {
        let mut dropped = raw(None);
        dropped.hobby = Some("garbage".into());
        let out = clean(vec![dropped]).unwrap();
        assert!(out.records.is_empty());
    }

    #[test]
    fn rejects_non_numeric_salary() {
        let mut record = raw(Some("Chile"));
        record.converted_salary = Some("lots".into());
        let err = clean(vec![record]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Coercion { field: "ConvertedSalary", .. }
        ));
    }
}
