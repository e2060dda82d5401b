use super::models::*;
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::debug;

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of a conditional status write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// Stored status no longer matched the expected one; another writer got there first
    Conflict,
    NotFound,
}

/// Latest `last_checked_at` still eligible for a recheck at `now`
pub(crate) fn recheck_cutoff(now: DateTime<Utc>, recheck_after: Duration) -> DateTime<Utc> {
    now.checked_sub_signed(recheck_after)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Persistence contract consumed by the reconciliation scheduler
///
/// INVARIANTS:
/// - `get_pending` returns at most `limit` records, all `Pending`, oldest first
/// - `update` is a compare-and-set on `status`
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Cheap reachability probe, run before a batch starts
    async fn ping(&self) -> StoreResult<()>;

    async fn insert(&self, record: &TransactionRecord) -> StoreResult<()>;

    async fn get(&self, tx_hash: &str) -> StoreResult<Option<TransactionRecord>>;

    /// Pending records eligible for a check at `now`.
    ///
    /// A record is eligible when it was never checked, or was last checked
    /// at least `recheck_after` ago. Creation age does not exclude anything.
    async fn get_pending(
        &self,
        recheck_after: Duration,
        limit: usize,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<TransactionRecord>>;

    /// Move `tx_hash` from `expected_previous` to `new_status`.
    ///
    /// On success `previous_status` holds the overwritten status.
    async fn update(
        &self,
        tx_hash: &str,
        expected_previous: TransactionStatus,
        new_status: TransactionStatus,
        checked_at: DateTime<Utc>,
    ) -> StoreResult<UpdateOutcome>;

    /// Refresh `last_checked_at` on a record that is still pending
    async fn mark_checked(&self, tx_hash: &str, checked_at: DateTime<Utc>) -> StoreResult<UpdateOutcome>;
}

/// PostgreSQL-backed transaction store
pub struct PgTransactionStore {
    pub pool: PgPool,
}

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, tx_hash: &str) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM ledger_transactions WHERE tx_hash = $1)",
        )
        .bind(tx_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn miss_outcome(&self, tx_hash: &str) -> StoreResult<UpdateOutcome> {
        if self.exists(tx_hash).await? {
            Ok(UpdateOutcome::Conflict)
        } else {
            Ok(UpdateOutcome::NotFound)
        }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, record: &TransactionRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ledger_transactions (tx_hash, status, previous_status, created_at, last_checked_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (tx_hash) DO NOTHING
            "#,
        )
        .bind(&record.tx_hash)
        .bind(record.status)
        .bind(record.previous_status)
        .bind(record.created_at)
        .bind(record.last_checked_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, tx_hash: &str) -> StoreResult<Option<TransactionRecord>> {
        let record = sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT tx_hash, status, previous_status, created_at, last_checked_at
            FROM ledger_transactions
            WHERE tx_hash = $1
            "#,
        )
        .bind(tx_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn get_pending(
        &self,
        recheck_after: Duration,
        limit: usize,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<TransactionRecord>> {
        let checked_before = recheck_cutoff(now, recheck_after);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let records = sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT tx_hash, status, previous_status, created_at, last_checked_at
            FROM ledger_transactions
            WHERE status = 'pending'
              AND (last_checked_at IS NULL OR last_checked_at <= $1)
            ORDER BY created_at ASC, tx_hash ASC
            LIMIT $2
            "#,
        )
        .bind(checked_before)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!("Selected {} pending transactions", records.len());
        Ok(records)
    }

    async fn update(
        &self,
        tx_hash: &str,
        expected_previous: TransactionStatus,
        new_status: TransactionStatus,
        checked_at: DateTime<Utc>,
    ) -> StoreResult<UpdateOutcome> {
        // previous_status = status reads the pre-update value
        let result = sqlx::query(
            r#"
            UPDATE ledger_transactions
            SET previous_status = status, status = $3, last_checked_at = $4
            WHERE tx_hash = $1 AND status = $2
            "#,
        )
        .bind(tx_hash)
        .bind(expected_previous)
        .bind(new_status)
        .bind(checked_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return self.miss_outcome(tx_hash).await;
        }

        Ok(UpdateOutcome::Applied)
    }

    async fn mark_checked(&self, tx_hash: &str, checked_at: DateTime<Utc>) -> StoreResult<UpdateOutcome> {
        let result = sqlx::query(
            r#"
            UPDATE ledger_transactions
            SET last_checked_at = $2
            WHERE tx_hash = $1 AND status = 'pending'
            "#,
        )
        .bind(tx_hash)
        .bind(checked_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return self.miss_outcome(tx_hash).await;
        }

        Ok(UpdateOutcome::Applied)
    }
}
