// Reconciliation scheduler - one pass of pending transactions against Horizon
//
// Pass flow:
// 1. Probe the store (unreachable store aborts the pass)
// 2. Select a bounded batch of pending records, oldest first
// 3. For each record, strictly one at a time:
//    ledger lookup -> resolve -> conditional write -> pause
// 4. Return the run summary
//
// Only store unavailability escapes a pass. Everything else is per item.
// The periodic loop outlives failed passes.

use chrono::Duration as ChronoDuration;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

use super::pacing::{Clock, FixedDelay, Pacer, SystemClock};
use super::resolver::resolve;
use crate::error::{AppError, AppResult, StoreError};
use crate::ledger::models::TransactionRecord;
use crate::ledger::repository::{TransactionStore, UpdateOutcome};
use crate::stellar::LedgerClient;

/// Counters for one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub updated: u32,
    pub unchanged: u32,
    pub failed: u32,
    /// Lost conditional writes; another run already handled the record
    pub conflicts: u32,
    pub cancelled: bool,
}

impl RunSummary {
    pub fn processed(&self) -> u32 {
        self.updated + self.unchanged + self.failed + self.conflicts
    }

    fn record(&mut self, item: ItemResult) {
        match item {
            ItemResult::Updated => self.updated += 1,
            ItemResult::Unchanged => self.unchanged += 1,
            ItemResult::Failed => self.failed += 1,
            ItemResult::Conflict => self.conflicts += 1,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "updated={} unchanged={} failed={} conflicts={}",
            self.updated, self.unchanged, self.failed, self.conflicts
        )?;
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemResult {
    Updated,
    Unchanged,
    Failed,
    Conflict,
}

pub struct ReconciliationScheduler {
    store: Arc<dyn TransactionStore>,
    ledger: Arc<dyn LedgerClient>,
    pacer: Arc<dyn Pacer>,
    clock: Arc<dyn Clock>,
    recheck_after: ChronoDuration,
    cancel: Option<watch::Receiver<bool>>,
}

impl ReconciliationScheduler {
    pub fn new(store: Arc<dyn TransactionStore>, ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            store,
            ledger,
            pacer: Arc::new(FixedDelay::from_millis(200)),
            clock: Arc::new(SystemClock),
            recheck_after: ChronoDuration::zero(),
            cancel: None,
        }
    }

    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Skip records checked less than `recheck_after` ago
    pub fn with_recheck_after(mut self, recheck_after: ChronoDuration) -> Self {
        self.recheck_after = recheck_after;
        self
    }

    /// Stop between items once the channel reads `true`
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map_or(false, |rx| *rx.borrow())
    }

    /// Reconcile up to `batch_limit` pending transactions.
    ///
    /// Records with no ledger entry expire once `max_age_seconds` old.
    #[instrument(skip(self))]
    pub async fn run_once(&self, max_age_seconds: i64, batch_limit: usize) -> AppResult<RunSummary> {
        self.store.ping().await?;

        let batch = self
            .store
            .get_pending(self.recheck_after, batch_limit, self.clock.now())
            .await?;

        if batch.is_empty() {
            info!("✓ No pending transactions to reconcile");
            return Ok(RunSummary::default());
        }

        info!("📊 Reconciling {} pending transactions", batch.len());

        let mut summary = RunSummary::default();
        for record in &batch {
            if self.is_cancelled() {
                warn!(
                    "⏹️ Reconciliation cancelled after {} of {} transactions",
                    summary.processed(),
                    batch.len()
                );
                summary.cancelled = true;
                break;
            }

            let item = self.process(record, max_age_seconds).await?;
            summary.record(item);

            self.pacer.pause().await;
        }

        info!("✓ Reconciliation pass complete: {}", summary);
        Ok(summary)
    }

    async fn process(&self, record: &TransactionRecord, max_age_seconds: i64) -> AppResult<ItemResult> {
        let tx_hash = record.tx_hash.as_str();

        let outcome = match self.ledger.fetch_transaction(tx_hash).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(tx_hash, "❌ Ledger lookup failed, will retry next pass: {}", e);
                // Stamp the attempt so the recheck window rotates the record out
                if let Err(store_err) = self.store.mark_checked(tx_hash, self.clock.now()).await {
                    isolate_store_error(tx_hash, store_err)?;
                }
                return Ok(ItemResult::Failed);
            }
        };

        let checked_at = self.clock.now();
        let age_seconds = record.age_seconds(checked_at);
        let resolution = resolve(record, outcome, age_seconds, max_age_seconds);

        if !resolution.changed {
            let result = match self.store.mark_checked(tx_hash, checked_at).await {
                Ok(UpdateOutcome::Applied) => ItemResult::Unchanged,
                Ok(UpdateOutcome::Conflict) => {
                    debug!(tx_hash, "Record settled by another run");
                    ItemResult::Conflict
                }
                Ok(UpdateOutcome::NotFound) => {
                    warn!(tx_hash, "Record disappeared during reconciliation");
                    ItemResult::Failed
                }
                Err(e) => isolate_store_error(tx_hash, e)?,
            };
            if result == ItemResult::Unchanged {
                info!(tx_hash, %outcome, age_seconds, "⏭️ Still {}", resolution.next_status);
            }
            return Ok(result);
        }

        let result = match self
            .store
            .update(tx_hash, record.status, resolution.next_status, checked_at)
            .await
        {
            Ok(UpdateOutcome::Applied) => {
                info!(
                    tx_hash,
                    %outcome,
                    age_seconds,
                    "✓ {} -> {}",
                    record.status,
                    resolution.next_status
                );
                ItemResult::Updated
            }
            Ok(UpdateOutcome::Conflict) => {
                info!(tx_hash, "Transition to {} already applied elsewhere", resolution.next_status);
                ItemResult::Conflict
            }
            Ok(UpdateOutcome::NotFound) => {
                warn!(tx_hash, "Record disappeared during reconciliation");
                ItemResult::Failed
            }
            Err(e) => isolate_store_error(tx_hash, e)?,
        };

        Ok(result)
    }

    /// Run a pass every `every` until cancelled
    pub async fn run_periodic(&self, every: Duration, max_age_seconds: i64, batch_limit: usize) -> AppResult<()> {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cancel = self.cancel.clone();

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = wait_cancelled(&mut cancel) => {
                    info!("⏹️ Periodic reconciliation stopped");
                    return Ok(());
                }
            }

            info!("🔄 Starting reconciliation cycle");
            match self.run_once(max_age_seconds, batch_limit).await {
                Ok(summary) if summary.cancelled => return Ok(()),
                Ok(_) => {}
                Err(e) => error!("❌ Reconciliation cycle failed, retrying next tick: {}", e),
            }
        }
    }
}

/// Resolves once the cancellation flag is raised; never if there is no channel
async fn wait_cancelled(cancel: &mut Option<watch::Receiver<bool>>) {
    match cancel {
        Some(rx) => {
            while !*rx.borrow_and_update() {
                if rx.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
        }
        None => std::future::pending::<()>().await,
    }
}

fn isolate_store_error(tx_hash: &str, error: StoreError) -> AppResult<ItemResult> {
    match error {
        StoreError::Unavailable(_) => {
            error!(tx_hash, "Transaction store unavailable, aborting pass: {}", error);
            Err(AppError::Store(error))
        }
        other => {
            warn!(tx_hash, "❌ Failed to persist reconciliation result: {}", other);
            Ok(ItemResult::Failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::ledger::memory::MemoryTransactionStore;
    use crate::ledger::models::{AccountSnapshot, LedgerOutcome, TransactionStatus};
    use crate::reconcile::pacing::{ManualClock, NoDelay};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use tokio::sync::Barrier;

    const MAX_AGE: i64 = 3600;

    #[derive(Clone, Copy)]
    enum Scripted {
        Answer(LedgerOutcome),
        Transient,
        Malformed,
    }

    /// Ledger fake answering from a fixed script
    struct ScriptedLedger {
        script: HashMap<String, Scripted>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedLedger {
        fn new(script: &[(&str, Scripted)]) -> Self {
            Self {
                script: script.iter().map(|(h, s)| (h.to_string(), *s)).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl LedgerClient for ScriptedLedger {
        async fn fetch_transaction(&self, tx_hash: &str) -> Result<LedgerOutcome, LedgerError> {
            self.calls.lock().push(tx_hash.to_string());
            match self.script.get(tx_hash).copied() {
                Some(Scripted::Answer(outcome)) => Ok(outcome),
                Some(Scripted::Transient) => Err(LedgerError::Transient("timed out".to_string())),
                Some(Scripted::Malformed) => Err(LedgerError::Malformed("not json".to_string())),
                None => Ok(LedgerOutcome::NotFound),
            }
        }

        async fn fetch_account(&self, public_key: &str) -> Result<AccountSnapshot, LedgerError> {
            Err(LedgerError::NotFound(public_key.to_string()))
        }
    }

    /// Answers `Success` only once `parties` callers are waiting
    struct RendezvousLedger {
        barrier: Barrier,
    }

    #[async_trait]
    impl LedgerClient for RendezvousLedger {
        async fn fetch_transaction(&self, _tx_hash: &str) -> Result<LedgerOutcome, LedgerError> {
            self.barrier.wait().await;
            Ok(LedgerOutcome::Success)
        }

        async fn fetch_account(&self, public_key: &str) -> Result<AccountSnapshot, LedgerError> {
            Err(LedgerError::NotFound(public_key.to_string()))
        }
    }

    /// Takes the store offline on first lookup
    struct StoreKillingLedger {
        store: Arc<MemoryTransactionStore>,
    }

    #[async_trait]
    impl LedgerClient for StoreKillingLedger {
        async fn fetch_transaction(&self, _tx_hash: &str) -> Result<LedgerOutcome, LedgerError> {
            self.store.set_offline(true);
            Ok(LedgerOutcome::Success)
        }

        async fn fetch_account(&self, public_key: &str) -> Result<AccountSnapshot, LedgerError> {
            Err(LedgerError::NotFound(public_key.to_string()))
        }
    }

    /// Counts pauses and raises the cancel flag after `cancel_after` of them
    struct CancellingPacer {
        pauses: Mutex<u32>,
        cancel_after: u32,
        cancel: watch::Sender<bool>,
    }

    #[async_trait]
    impl Pacer for CancellingPacer {
        async fn pause(&self) {
            let mut pauses = self.pauses.lock();
            *pauses += 1;
            if *pauses >= self.cancel_after {
                let _ = self.cancel.send(true);
            }
        }
    }

    fn pending(hash: &str, now: DateTime<Utc>, age_seconds: i64) -> TransactionRecord {
        TransactionRecord::pending(hash, now - ChronoDuration::seconds(age_seconds))
    }

    fn scheduler(
        store: Arc<MemoryTransactionStore>,
        ledger: Arc<dyn LedgerClient>,
        now: DateTime<Utc>,
    ) -> ReconciliationScheduler {
        ReconciliationScheduler::new(store, ledger)
            .with_pacer(Arc::new(NoDelay))
            .with_clock(Arc::new(ManualClock::new(now)))
    }

    async fn status_of(store: &MemoryTransactionStore, hash: &str) -> TransactionStatus {
        store.get(hash).await.unwrap().unwrap().status
    }

    #[tokio::test]
    async fn test_mixed_batch_resolves_each_record() {
        let now = Utc::now();
        let store = Arc::new(
            MemoryTransactionStore::with_records(vec![
                pending("young", now, 10),
                pending("old-missing", now, 4000),
                pending("old-failed", now, 4000),
            ])
            .await,
        );
        let ledger = Arc::new(ScriptedLedger::new(&[
            ("young", Scripted::Answer(LedgerOutcome::Success)),
            ("old-missing", Scripted::Answer(LedgerOutcome::NotFound)),
            ("old-failed", Scripted::Answer(LedgerOutcome::Failed)),
        ]));

        let summary = scheduler(store.clone(), ledger.clone(), now)
            .run_once(MAX_AGE, 50)
            .await
            .unwrap();

        assert_eq!(summary.updated, 3);
        assert_eq!(summary.unchanged, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.conflicts, 0);
        assert!(!summary.cancelled);

        assert_eq!(status_of(&store, "young").await, TransactionStatus::Confirmed);
        assert_eq!(status_of(&store, "old-missing").await, TransactionStatus::Expired);
        assert_eq!(status_of(&store, "old-failed").await, TransactionStatus::Failed);

        let expired = store.get("old-missing").await.unwrap().unwrap();
        assert_eq!(expired.previous_status, Some(TransactionStatus::Pending));
        assert_eq!(expired.last_checked_at, Some(now));

        // Oldest first; equal ages fall back to hash order
        assert_eq!(ledger.calls(), vec!["old-failed", "old-missing", "young"]);
    }

    #[tokio::test]
    async fn test_young_unknown_transaction_stays_pending() {
        let now = Utc::now();
        let store = Arc::new(MemoryTransactionStore::with_records(vec![pending("inflight", now, 30)]).await);
        let ledger = Arc::new(ScriptedLedger::new(&[]));

        let summary = scheduler(store.clone(), ledger, now)
            .run_once(MAX_AGE, 50)
            .await
            .unwrap();

        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.updated, 0);

        let record = store.get("inflight").await.unwrap().unwrap();
        assert_eq!(record.status, TransactionStatus::Pending);
        assert_eq!(record.previous_status, None);
        assert_eq!(record.last_checked_at, Some(now));
    }

    #[tokio::test]
    async fn test_ledger_errors_are_isolated() {
        let now = Utc::now();
        let store = Arc::new(
            MemoryTransactionStore::with_records(vec![
                pending("first", now, 300),
                pending("flaky", now, 200),
                pending("garbled", now, 150),
                pending("last", now, 100),
            ])
            .await,
        );
        let ledger = Arc::new(ScriptedLedger::new(&[
            ("first", Scripted::Answer(LedgerOutcome::Success)),
            ("flaky", Scripted::Transient),
            ("garbled", Scripted::Malformed),
            ("last", Scripted::Answer(LedgerOutcome::Failed)),
        ]));

        let summary = scheduler(store.clone(), ledger.clone(), now)
            .run_once(MAX_AGE, 50)
            .await
            .unwrap();

        assert_eq!(summary.updated, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(ledger.calls().len(), 4);

        // Failed lookups keep the status and only record the attempt
        for hash in ["flaky", "garbled"] {
            let record = store.get(hash).await.unwrap().unwrap();
            assert_eq!(record.status, TransactionStatus::Pending);
            assert_eq!(record.previous_status, None);
            assert_eq!(record.last_checked_at, Some(now));
        }
    }

    #[tokio::test]
    async fn test_failing_records_do_not_starve_the_queue() {
        let now = Utc::now();
        let store = Arc::new(
            MemoryTransactionStore::with_records(vec![
                pending("bad-1", now, 500),
                pending("bad-2", now, 400),
                pending("good", now, 10),
            ])
            .await,
        );
        let ledger = Arc::new(ScriptedLedger::new(&[
            ("bad-1", Scripted::Malformed),
            ("bad-2", Scripted::Malformed),
            ("good", Scripted::Answer(LedgerOutcome::Success)),
        ]));

        let scheduler = scheduler(store.clone(), ledger.clone(), now).with_recheck_after(ChronoDuration::seconds(60));

        let first = scheduler.run_once(MAX_AGE, 2).await.unwrap();
        assert_eq!(first.failed, 2);

        let second = scheduler.run_once(MAX_AGE, 2).await.unwrap();
        assert_eq!(second.updated, 1);
        assert_eq!(status_of(&store, "good").await, TransactionStatus::Confirmed);
        assert_eq!(ledger.calls(), vec!["bad-1", "bad-2", "good"]);
    }

    #[tokio::test]
    async fn test_batch_limit_bounds_the_pass() {
        let now = Utc::now();
        let records = (0..10).map(|i| pending(&format!("tx{}", i), now, 100 + i));
        let store = Arc::new(MemoryTransactionStore::with_records(records).await);
        let ledger = Arc::new(ScriptedLedger::new(&[]));

        let summary = scheduler(store, ledger.clone(), now)
            .run_once(MAX_AGE, 3)
            .await
            .unwrap();

        assert_eq!(summary.processed(), 3);
        assert_eq!(ledger.calls(), vec!["tx9", "tx8", "tx7"]);
    }

    #[tokio::test]
    async fn test_recheck_window_skips_recent_checks() {
        let now = Utc::now();
        let store = Arc::new(MemoryTransactionStore::with_records(vec![pending("inflight", now, 30)]).await);
        let ledger = Arc::new(ScriptedLedger::new(&[]));
        let clock = Arc::new(ManualClock::new(now));

        let scheduler = ReconciliationScheduler::new(store.clone(), ledger.clone())
            .with_pacer(Arc::new(NoDelay))
            .with_clock(clock.clone())
            .with_recheck_after(ChronoDuration::seconds(60));

        assert_eq!(scheduler.run_once(MAX_AGE, 50).await.unwrap().unchanged, 1);
        assert_eq!(scheduler.run_once(MAX_AGE, 50).await.unwrap().processed(), 0);

        clock.advance(ChronoDuration::seconds(61));
        assert_eq!(scheduler.run_once(MAX_AGE, 50).await.unwrap().unchanged, 1);
        assert_eq!(ledger.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_runs_apply_once() {
        let now = Utc::now();
        let store = Arc::new(MemoryTransactionStore::with_records(vec![pending("shared", now, 60)]).await);
        let ledger: Arc<dyn LedgerClient> = Arc::new(RendezvousLedger {
            barrier: Barrier::new(2),
        });

        let a = scheduler(store.clone(), ledger.clone(), now);
        let b = scheduler(store.clone(), ledger, now);

        let (first, second) = tokio::join!(a.run_once(MAX_AGE, 50), b.run_once(MAX_AGE, 50));
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_eq!(first.updated + second.updated, 1);
        assert_eq!(first.conflicts + second.conflicts, 1);
        assert_eq!(first.failed + second.failed, 0);
        assert_eq!(status_of(&store, "shared").await, TransactionStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_cancellation_stops_between_items() {
        let now = Utc::now();
        let store = Arc::new(
            MemoryTransactionStore::with_records(vec![
                pending("a", now, 300),
                pending("b", now, 200),
                pending("c", now, 100),
            ])
            .await,
        );
        let ledger = Arc::new(ScriptedLedger::new(&[
            ("a", Scripted::Answer(LedgerOutcome::Success)),
            ("b", Scripted::Answer(LedgerOutcome::Success)),
            ("c", Scripted::Answer(LedgerOutcome::Success)),
        ]));
        let (tx, rx) = watch::channel(false);
        let pacer = Arc::new(CancellingPacer {
            pauses: Mutex::new(0),
            cancel_after: 1,
            cancel: tx,
        });

        let summary = ReconciliationScheduler::new(store.clone(), ledger.clone())
            .with_pacer(pacer)
            .with_clock(Arc::new(ManualClock::new(now)))
            .with_cancellation(rx)
            .run_once(MAX_AGE, 50)
            .await
            .unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.updated, 1);
        assert_eq!(ledger.calls(), vec!["a"]);
        assert_eq!(status_of(&store, "b").await, TransactionStatus::Pending);
        assert_eq!(status_of(&store, "c").await, TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_the_run() {
        let store = Arc::new(MemoryTransactionStore::new());
        store.set_offline(true);
        let ledger = Arc::new(ScriptedLedger::new(&[]));

        let result = scheduler(store, ledger.clone(), Utc::now()).run_once(MAX_AGE, 50).await;

        assert!(matches!(result, Err(AppError::Store(StoreError::Unavailable(_)))));
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_store_loss_mid_batch_aborts() {
        let now = Utc::now();
        let store = Arc::new(
            MemoryTransactionStore::with_records(vec![pending("a", now, 300), pending("b", now, 200)]).await,
        );
        let ledger = Arc::new(StoreKillingLedger { store: store.clone() });

        let result = scheduler(store, ledger, now).run_once(MAX_AGE, 50).await;
        assert!(matches!(result, Err(AppError::Store(StoreError::Unavailable(_)))));
    }

    #[tokio::test]
    async fn test_run_periodic_stops_on_cancel() {
        let now = Utc::now();
        let store = Arc::new(MemoryTransactionStore::with_records(vec![pending("a", now, 10)]).await);
        let ledger = Arc::new(ScriptedLedger::new(&[("a", Scripted::Answer(LedgerOutcome::Success))]));
        let (tx, rx) = watch::channel(false);

        let scheduler = scheduler(store.clone(), ledger, now).with_cancellation(rx);
        let stopper = async {
            while status_of(&store, "a").await != TransactionStatus::Confirmed {
                tokio::task::yield_now().await;
            }
            tx.send(true).unwrap();
        };

        let (result, _) = tokio::join!(
            scheduler.run_periodic(Duration::from_millis(10), MAX_AGE, 50),
            stopper
        );
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_periodic_survives_store_outage() {
        let now = Utc::now();
        let store = Arc::new(MemoryTransactionStore::with_records(vec![pending("a", now, 10)]).await);
        store.set_offline(true);
        let ledger = Arc::new(ScriptedLedger::new(&[("a", Scripted::Answer(LedgerOutcome::Success))]));
        let (tx, rx) = watch::channel(false);

        let scheduler = scheduler(store.clone(), ledger.clone(), now).with_cancellation(rx);
        let recover = async {
            // Several ticks fail against the offline store first
            tokio::time::sleep(Duration::from_millis(35)).await;
            assert!(ledger.calls().is_empty());
            store.set_offline(false);
            while status_of(&store, "a").await != TransactionStatus::Confirmed {
                tokio::task::yield_now().await;
            }
            tx.send(true).unwrap();
        };

        let (result, _) = tokio::join!(
            scheduler.run_periodic(Duration::from_millis(10), MAX_AGE, 50),
            recover
        );
        assert!(result.is_ok());
        assert_eq!(ledger.calls(), vec!["a"]);
    }

    #[test]
    fn test_summary_line() {
        let summary = RunSummary {
            updated: 2,
            unchanged: 1,
            failed: 0,
            conflicts: 1,
            cancelled: false,
        };
        assert_eq!(summary.to_string(), "updated=2 unchanged=1 failed=0 conflicts=1");
        assert_eq!(summary.processed(), 4);
    }
}
