use super::models::{TransactionRecord, TransactionStatus};
use super::repository::{recheck_cutoff, StoreResult, TransactionStore, UpdateOutcome};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// In-process transaction store.
///
/// Used for dry runs and tests. Writes take the map's write lock, so the
/// compare-and-set in `update` is atomic with respect to other callers.
pub struct MemoryTransactionStore {
    records: RwLock<HashMap<String, TransactionRecord>>,
    offline: AtomicBool,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            offline: AtomicBool::new(false),
        }
    }

    pub async fn with_records(records: impl IntoIterator<Item = TransactionRecord>) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.write().await;
            for record in records {
                map.insert(record.tx_hash.clone(), record);
            }
        }
        store
    }

    /// Simulate losing the backing database
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn ping(&self) -> StoreResult<()> {
        self.check_online()
    }

    async fn insert(&self, record: &TransactionRecord) -> StoreResult<()> {
        self.check_online()?;
        let mut records = self.records.write().await;
        records
            .entry(record.tx_hash.clone())
            .or_insert_with(|| record.clone());
        Ok(())
    }

    async fn get(&self, tx_hash: &str) -> StoreResult<Option<TransactionRecord>> {
        self.check_online()?;
        Ok(self.records.read().await.get(tx_hash).cloned())
    }

    async fn get_pending(
        &self,
        recheck_after: Duration,
        limit: usize,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<TransactionRecord>> {
        self.check_online()?;
        let checked_before = recheck_cutoff(now, recheck_after);
        let records = self.records.read().await;

        let mut pending: Vec<TransactionRecord> = records
            .values()
            .filter(|r| r.status == TransactionStatus::Pending)
            .filter(|r| r.last_checked_at.map_or(true, |at| at <= checked_before))
            .cloned()
            .collect();

        pending.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.tx_hash.cmp(&b.tx_hash))
        });
        pending.truncate(limit);

        Ok(pending)
    }

    async fn update(
        &self,
        tx_hash: &str,
        expected_previous: TransactionStatus,
        new_status: TransactionStatus,
        checked_at: DateTime<Utc>,
    ) -> StoreResult<UpdateOutcome> {
        self.check_online()?;
        let mut records = self.records.write().await;

        let Some(record) = records.get_mut(tx_hash) else {
            return Ok(UpdateOutcome::NotFound);
        };

        if record.status != expected_previous {
            return Ok(UpdateOutcome::Conflict);
        }

        record.previous_status = Some(record.status);
        record.status = new_status;
        record.last_checked_at = Some(checked_at);

        Ok(UpdateOutcome::Applied)
    }

    async fn mark_checked(&self, tx_hash: &str, checked_at: DateTime<Utc>) -> StoreResult<UpdateOutcome> {
        self.check_online()?;
        let mut records = self.records.write().await;

        let Some(record) = records.get_mut(tx_hash) else {
            return Ok(UpdateOutcome::NotFound);
        };

        if record.status != TransactionStatus::Pending {
            return Ok(UpdateOutcome::Conflict);
        }

        record.last_checked_at = Some(checked_at);
        Ok(UpdateOutcome::Applied)
    }
}
