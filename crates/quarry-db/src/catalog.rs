//! In-memory name → id lookups built between load phases.
//!
//! A [`DimensionCatalog`] only exists after the dimension phase has run, and
//! the fact loader takes one by reference, so facts cannot be written before
//! their dimensions. The same holds for [`RespondentIndex`] and junctions.

use std::collections::HashMap;

use quarry_core::Dimension;

use crate::StoreDb;
use crate::error::DatabaseError;
use crate::helpers::{RESPONDENT_TABLE, dimension_table, name_column};

/// Ids of every row in each successfully loaded dimension table.
#[derive(Debug, Default, Clone)]
pub struct DimensionCatalog {
    ids: HashMap<Dimension, HashMap<String, i64>>,
}

impl DimensionCatalog {
    /// Read the full id map of `dimension` from the store and register it.
    pub(crate) async fn fetch(
        &mut self,
        db: &StoreDb,
        dimension: Dimension,
    ) -> Result<(), DatabaseError> {
        let ids = fetch_ids(db, dimension_table(dimension), name_column(dimension)).await?;
        self.ids.insert(dimension, ids);
        Ok(())
    }

    #[must_use]
    pub fn is_loaded(&self, dimension: Dimension) -> bool {
        self.ids.contains_key(&dimension)
    }

    /// Check that every dimension in `dimensions` loaded.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::DimensionNotLoaded`] for the first one missing.
    pub fn require(&self, dimensions: &[Dimension]) -> Result<(), DatabaseError> {
        dimensions
            .iter()
            .find(|d| !self.is_loaded(**d))
            .map_or(Ok(()), |d| Err(DatabaseError::DimensionNotLoaded(*d)))
    }

    /// Id of the row named `name` in `dimension`.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::DimensionNotLoaded`] if the dimension is absent,
    /// or [`DatabaseError::UnresolvedKey`] if the name has no row.
    pub fn resolve(&self, dimension: Dimension, name: &str) -> Result<i64, DatabaseError> {
        let ids = self
            .ids
            .get(&dimension)
            .ok_or(DatabaseError::DimensionNotLoaded(dimension))?;
        ids.get(name)
            .copied()
            .ok_or_else(|| DatabaseError::UnresolvedKey {
                dimension: dimension.to_string(),
                name: name.to_owned(),
            })
    }

    /// Number of rows known for `dimension` (0 when not loaded).
    #[must_use]
    pub fn len(&self, dimension: Dimension) -> usize {
        self.ids.get(&dimension).map_or(0, HashMap::len)
    }
}

/// Ids of every respondent row, keyed by display name.
#[derive(Debug, Default, Clone)]
pub struct RespondentIndex {
    ids: HashMap<String, i64>,
}

impl RespondentIndex {
    pub(crate) async fn fetch(db: &StoreDb) -> Result<Self, DatabaseError> {
        Ok(Self {
            ids: fetch_ids(db, RESPONDENT_TABLE, "nome").await?,
        })
    }

    /// Id of the respondent with display name `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::UnresolvedKey`] if no such respondent exists.
    pub fn resolve(&self, name: &str) -> Result<i64, DatabaseError> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| DatabaseError::UnresolvedKey {
                dimension: RESPONDENT_TABLE.to_owned(),
                name: name.to_owned(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

async fn fetch_ids(
    db: &StoreDb,
    table: &str,
    column: &str,
) -> Result<HashMap<String, i64>, DatabaseError> {
    let mut rows = db
        .conn()
        .query(&format!("SELECT id, {column} FROM {table}"), ())
        .await?;
    let mut ids = HashMap::new();
    while let Some(row) = rows.next().await? {
        ids.insert(row.get::<String>(1)?, row.get::<i64>(0)?);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::test_db;

    #[tokio::test]
    async fn fetch_reads_existing_rows() {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO empresa (tamanho) VALUES ('');
                 INSERT INTO empresa (tamanho) VALUES ('10 to 19 employees');",
            )
            .await
            .unwrap();

        let mut catalog = DimensionCatalog::default();
        catalog.fetch(&db, Dimension::CompanySize).await.unwrap();

        assert_eq!(catalog.len(Dimension::CompanySize), 2);
        assert_eq!(catalog.resolve(Dimension::CompanySize, "").unwrap(), 1);
        assert_eq!(
            catalog
                .resolve(Dimension::CompanySize, "10 to 19 employees")
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn resolve_unknown_name_is_unresolved_key() {
        let db = test_db().await;
        let mut catalog = DimensionCatalog::default();
        catalog.fetch(&db, Dimension::Country).await.unwrap();

        let err = catalog.resolve(Dimension::Country, "Atlantis").unwrap_err();
        assert!(matches!(err, DatabaseError::UnresolvedKey { name, .. } if name == "Atlantis"));
    }

    #[test]
    fn require_names_first_missing_dimension() {
        let catalog = DimensionCatalog::default();
        let err = catalog
            .require(&[Dimension::OperatingSystem, Dimension::Country])
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::DimensionNotLoaded(Dimension::OperatingSystem)
        ));
        assert!(catalog.require(&[]).is_ok());
    }

    #[tokio::test]
    async fn respondent_index_resolves_by_display_name() {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO pais (nome) VALUES ('Brazil');
                 INSERT INTO empresa (tamanho) VALUES ('');
                 INSERT INTO sistema_operacional (nome) VALUES ('Linux');
                 INSERT INTO respondente (nome, sistema_operacional_id, pais_id, empresa_id)
                     VALUES ('respondent_7', 1, 1, 1);",
            )
            .await
            .unwrap();

        let index = RespondentIndex::fetch(&db).await.unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.resolve("respondent_7").unwrap(), 1);
        assert!(index.resolve("respondent_8").is_err());
    }
}
