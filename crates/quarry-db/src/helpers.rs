//! Table and column names for each dimension and junction.
//!
//! Exhaustive matches: adding a `Dimension` variant forces updating these.

use quarry_core::Dimension;

/// Fact table holding one row per respondent.
pub const RESPONDENT_TABLE: &str = "respondente";

/// Map a dimension to its SQL table.
#[must_use]
pub const fn dimension_table(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Country => "pais",
        Dimension::CompanySize => "empresa",
        Dimension::OperatingSystem => "sistema_operacional",
        Dimension::Language => "linguagem_programacao",
        Dimension::CommunicationTool => "ferramenta_comunic",
    }
}

/// Map a dimension to the column holding its textual value.
#[must_use]
pub const fn name_column(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::CompanySize => "tamanho",
        Dimension::Country
        | Dimension::OperatingSystem
        | Dimension::Language
        | Dimension::CommunicationTool => "nome",
    }
}

/// Many-to-many relationship between respondents and a multi-valued dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Junction {
    Language,
    CommunicationTool,
}

impl Junction {
    pub const ALL: [Self; 2] = [Self::Language, Self::CommunicationTool];

    /// The dimension on the non-respondent side.
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Language => Dimension::Language,
            Self::CommunicationTool => Dimension::CommunicationTool,
        }
    }

    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Language => "resp_usa_linguagem",
            Self::CommunicationTool => "resp_usa_ferramenta",
        }
    }

    /// Insert statement taking `(respondent_id, dimension_id)`.
    #[must_use]
    pub const fn insert_sql(self) -> &'static str {
        match self {
            Self::Language => {
                "INSERT INTO resp_usa_linguagem (respondente_id, linguagem_programacao_id)
                 VALUES (?1, ?2) ON CONFLICT DO NOTHING"
            }
            Self::CommunicationTool => {
                "INSERT INTO resp_usa_ferramenta (respondente_id, ferramenta_comunic_id)
                 VALUES (?1, ?2) ON CONFLICT DO NOTHING"
            }
        }
    }

    /// Phase label used in logs and the run report.
    #[must_use]
    pub const fn phase(self) -> &'static str {
        match self {
            Self::Language => "languages",
            Self::CommunicationTool => "communication_tools",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn dimension_tables_are_distinct() {
        let tables: HashSet<&str> = Dimension::ALL.into_iter().map(dimension_table).collect();
        assert_eq!(tables.len(), Dimension::ALL.len());
    }

    #[test]
    fn only_company_size_uses_tamanho() {
        for dim in Dimension::ALL {
            let expected = if dim == Dimension::CompanySize { "tamanho" } else { "nome" };
            assert_eq!(name_column(dim), expected, "{dim}");
        }
    }

    #[test]
    fn junctions_reference_multi_valued_dimensions() {
        for junction in Junction::ALL {
            assert!(junction.dimension().is_multi_valued());
            assert!(junction.insert_sql().contains(junction.table()));
        }
    }
}
