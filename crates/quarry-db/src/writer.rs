//! Batched row writer shared by the fact and junction loaders.
//!
//! Rows are buffered and flushed `batch_size` at a time, one transaction per
//! batch. A row whose statement fails is recorded and the batch carries on; a
//! batch whose transaction cannot begin or commit fails every row in it.

use libsql::Value;

use crate::StoreDb;
use crate::report::PhaseReport;

/// A row ready to insert: its report key and positional parameters.
pub(crate) struct PendingRow {
    pub key: String,
    pub params: Vec<Value>,
}

pub(crate) struct BatchWriter<'a> {
    db: &'a StoreDb,
    sql: &'static str,
    batch_size: usize,
    pending: Vec<PendingRow>,
    report: PhaseReport,
}

impl<'a> BatchWriter<'a> {
    pub fn new(db: &'a StoreDb, sql: &'static str, batch_size: usize, phase: &str) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            db,
            sql,
            batch_size,
            pending: Vec::with_capacity(batch_size),
            report: PhaseReport::new(phase),
        }
    }

    /// Record a row that failed before reaching the store.
    pub fn reject(&mut self, key: impl Into<String>, reason: impl ToString) {
        let (key, reason) = (key.into(), reason.to_string());
        tracing::warn!(phase = %self.report.phase, %key, %reason, "row rejected");
        self.report.attempted += 1;
        self.report.fail(key, reason);
    }

    pub async fn push(&mut self, row: PendingRow) {
        self.report.attempted += 1;
        self.pending.push(row);
        if self.pending.len() >= self.batch_size {
            self.flush().await;
        }
    }

    /// Flush the last partial batch and hand back the phase counts.
    pub async fn finish(mut self) -> PhaseReport {
        self.flush().await;
        self.report
    }

    async fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let batch = std::mem::take(&mut self.pending);
        let size = batch.len();

        let tx = match self.db.conn().transaction().await {
            Ok(tx) => tx,
            Err(e) => {
                self.fail_batch(batch.into_iter().map(|r| r.key), &format!("begin batch: {e}"));
                return;
            }
        };

        let mut keys = Vec::with_capacity(size);
        let mut failures = Vec::new();
        let (mut inserted, mut existing) = (0, 0);
        for row in batch {
            match tx.execute(self.sql, row.params).await {
                Ok(0) => existing += 1,
                Ok(_) => inserted += 1,
                Err(e) => {
                    tracing::warn!(phase = %self.report.phase, key = %row.key, error = %e, "row insert failed");
                    failures.push((row.key.clone(), e.to_string()));
                }
            }
            keys.push(row.key);
        }

        if let Err(e) = tx.commit().await {
            tracing::warn!(phase = %self.report.phase, rows = size, error = %e, "batch commit failed");
            self.fail_batch(keys.into_iter(), &format!("commit batch: {e}"));
            return;
        }

        self.report.inserted += inserted;
        self.report.skipped_existing += existing;
        for (key, reason) in failures {
            self.report.fail(key, reason);
        }
        tracing::debug!(phase = %self.report.phase, rows = size, inserted, "batch committed");
    }

    fn fail_batch(&mut self, keys: impl Iterator<Item = String>, reason: &str) {
        for key in keys {
            self.report.fail(key, reason);
        }
    }
}
