//! # quarry-db
//!
//! libSQL storage for the normalized survey schema.
//!
//! Load phases, in the only order the types allow:
//! 1. [`StoreDb::ensure_schema`] creates every table (idempotent, one transaction)
//! 2. [`dimensions::load_dimensions`] writes the distinct value sets and returns
//!    a [`catalog::DimensionCatalog`] of name → id for the dimensions that loaded
//! 3. [`facts::load_respondents`] needs that catalog and returns a
//!    [`catalog::RespondentIndex`]
//! 4. [`junctions::load_junction`] needs both
//!
//! Row-level failures are collected in [`report::PhaseReport`]s instead of
//! aborting the phase.

pub mod catalog;
pub mod dimensions;
pub mod error;
pub mod facts;
pub mod helpers;
pub mod junctions;
pub mod report;
mod schema;
#[cfg(test)]
mod test_support;
mod writer;

use std::path::Path;

use error::DatabaseError;
use libsql::Builder;
use quarry_config::StoreConfig;

/// Handle on the target store: one database, one connection per run.
pub struct StoreDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl StoreDb {
    /// Open the store described by `config`.
    ///
    /// A remote URL wins; otherwise the local file `<data_dir>/<database>.db`
    /// is opened, creating `data_dir` when needed.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Connection`] if the store cannot be opened or
    /// does not answer.
    pub async fn connect(config: &StoreConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            return Self::open_remote(&config.url, &config.auth_token).await;
        }

        let path = config.local_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Connection(format!("create {}: {e}", parent.display()))
            })?;
        }
        Self::open_local(&path.to_string_lossy()).await
    }

    /// Open a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Connection`] if the file cannot be opened.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(Path::new(path))
            .build()
            .await
            .map_err(|e| DatabaseError::Connection(format!("{path}: {e}")))?;
        Self::init(db, path).await
    }

    /// Open a remote libSQL server.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Connection`] if the server is unreachable or
    /// rejects the token.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_owned(), auth_token.to_owned())
            .build()
            .await
            .map_err(|e| DatabaseError::Connection(format!("{url}: {e}")))?;
        Self::init(db, url).await
    }

    async fn init(db: libsql::Database, target: &str) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Connection(format!("{target}: {e}")))?;

        // Remote builders connect lazily; this query surfaces auth and network errors here.
        conn.query("SELECT 1", ())
            .await
            .map_err(|e| DatabaseError::Connection(format!("{target}: {e}")))?;

        // Must be per-connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Connection(format!("PRAGMA foreign_keys: {e}")))?;

        tracing::info!(target, "connected to store");
        Ok(Self { db, conn })
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Number of rows in `table`.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError`] if the query fails.
    pub async fn row_count(&self, table: &str) -> Result<u64, DatabaseError> {
        let mut rows = self
            .conn
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::Query(format!("COUNT(*) on {table} returned no row")))?;
        Ok(u64::try_from(row.get::<i64>(0)?).unwrap_or_default())
    }
}
