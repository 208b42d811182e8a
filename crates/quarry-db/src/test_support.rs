//! Shared test utilities for quarry-db unit tests.

pub(crate) mod helpers {
    use crate::StoreDb;

    /// In-memory store with the schema already created.
    pub async fn test_db() -> StoreDb {
        let db = StoreDb::open_local(":memory:").await.unwrap();
        db.ensure_schema().await.unwrap();
        db
    }
}
