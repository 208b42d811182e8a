//! Schema creation.
//!
//! The DDL is embedded at compile time. Every statement uses `IF NOT EXISTS`,
//! so creating the schema against an already-populated store is a no-op.

use crate::StoreDb;
use crate::error::DatabaseError;

/// Survey schema: five dimension tables, the respondent fact table, two junctions.
const SURVEY_SCHEMA: &str = include_str!("../migrations/001_survey_schema.sql");

impl StoreDb {
    /// Create every table in a single transaction.
    ///
    /// On failure nothing is committed, so a half-created schema never survives.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Schema`] if any statement fails.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        let tx = self
            .conn
            .transaction()
            .await
            .map_err(|e| DatabaseError::Schema(format!("begin: {e}")))?;

        if let Err(e) = tx.execute_batch(SURVEY_SCHEMA).await {
            tx.rollback().await.ok();
            return Err(DatabaseError::Schema(format!("001_survey_schema: {e}")));
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::Schema(format!("commit: {e}")))?;
        tracing::debug!("survey schema ensured");
        Ok(())
    }
}
