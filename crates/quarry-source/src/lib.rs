//! # quarry-source
//!
//! Reads the survey CSV into [`RawRecord`]s using `DuckDB`'s `read_csv`.
//!
//! Every column is read as text (`all_varchar`) so coercion stays in the
//! cleaner; cells matching one of the configured null markers come back as
//! `None`. Only the nine survey columns the pipeline uses are selected, in
//! file order.

pub mod error;

pub use error::SourceError;

use std::path::Path;

use duckdb::Connection;
use quarry_config::SourceConfig;
use quarry_core::RawRecord;

/// Header names of the columns the pipeline reads, in [`RawRecord`] field order.
pub const COLUMNS: [&str; 9] = [
    "Respondent",
    "Hobby",
    "OpenSource",
    "Country",
    "CompanySize",
    "ConvertedSalary",
    "CommunicationTools",
    "OperatingSystem",
    "LanguageWorkedWith",
];

/// CSV reader backed by an in-memory `DuckDB` connection.
pub struct SurveyReader {
    conn: Connection,
    delimiter: String,
    null_markers: Vec<String>,
}

impl SurveyReader {
    /// Open a reader with the delimiter and null markers from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::DuckDb`] if the in-memory database cannot be opened.
    pub fn open(config: &SourceConfig) -> Result<Self, SourceError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            delimiter: config.delimiter.clone(),
            null_markers: config.null_markers.clone(),
        })
    }

    /// Read every row of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] if the file does not exist,
    /// [`SourceError::MissingColumn`] if the header lacks a required column, or
    /// [`SourceError::DuckDb`] if the file cannot be parsed.
    pub fn read(&self, path: &Path) -> Result<Vec<RawRecord>, SourceError> {
        let display = path.display().to_string();
        if !path.is_file() {
            return Err(SourceError::NotFound(display));
        }

        let scan = self.scan_expr(&display);
        let header = self.header(&scan)?;
        if let Some(column) = COLUMNS.into_iter().find(|c| !header.iter().any(|h| h == c)) {
            return Err(SourceError::MissingColumn {
                path: display,
                column,
            });
        }

        let select = COLUMNS
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = self.conn.prepare(&format!("SELECT {select} FROM {scan}"))?;
        let records = stmt
            .query_map([], |row| {
                Ok(RawRecord {
                    respondent: row.get(0)?,
                    hobby: row.get(1)?,
                    open_source: row.get(2)?,
                    country: row.get(3)?,
                    company_size: row.get(4)?,
                    converted_salary: row.get(5)?,
                    communication_tools: row.get(6)?,
                    operating_system: row.get(7)?,
                    languages: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(path = %path.display(), rows = records.len(), "read survey source");
        Ok(records)
    }

    /// Column names of the file's header row.
    fn header(&self, scan: &str) -> Result<Vec<String>, SourceError> {
        let mut stmt = self.conn.prepare(&format!("DESCRIBE SELECT * FROM {scan}"))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// The `read_csv(...)` table expression for `path`.
    fn scan_expr(&self, path: &str) -> String {
        let mut options = vec![
            "header = true".to_owned(),
            "all_varchar = true".to_owned(),
            format!("delim = {}", sql_literal(&self.delimiter)),
        ];
        if !self.null_markers.is_empty() {
            let markers = self
                .null_markers
                .iter()
                .map(|m| sql_literal(m))
                .collect::<Vec<_>>()
                .join(", ");
            options.push(format!("nullstr = [{markers}]"));
        }
        format!("read_csv({}, {})", sql_literal(path), options.join(", "))
    }
}

/// Quote `value` as a SQL string literal.
fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
