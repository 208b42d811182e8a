//! Categorical domains materialized as dimension tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::records::CleanRecord;

/// One categorical domain of the survey.
///
/// Single-valued dimensions take the whole field value; multi-valued
/// dimensions hold `;`-delimited labels that are split before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Country,
    CompanySize,
    OperatingSystem,
    Language,
    CommunicationTool,
}

impl Dimension {
    /// Every dimension, in load order.
    pub const ALL: [Self; 5] = [
        Self::OperatingSystem,
        Self::Country,
        Self::CompanySize,
        Self::Language,
        Self::CommunicationTool,
    ];

    /// Dimensions referenced by the respondent fact row.
    pub const FACT_KEYS: [Self; 3] = [Self::OperatingSystem, Self::Country, Self::CompanySize];

    /// Return the snake_case label used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::CompanySize => "company_size",
            Self::OperatingSystem => "operating_system",
            Self::Language => "language",
            Self::CommunicationTool => "communication_tool",
        }
    }

    /// Whether the source field holds several `;`-delimited labels.
    #[must_use]
    pub const fn is_multi_valued(self) -> bool {
        matches!(self, Self::Language | Self::CommunicationTool)
    }

    /// The record's raw field value for this dimension.
    #[must_use]
    pub fn value_of(self, record: &CleanRecord) -> &str {
        match self {
            Self::Country => &record.country,
            Self::CompanySize => &record.company_size,
            Self::OperatingSystem => &record.operating_system,
            Self::Language => &record.languages,
            Self::CommunicationTool => &record.communication_tools,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
