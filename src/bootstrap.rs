use std::{sync::Arc, time::Duration};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::sync::watch;
use tracing::info;

use crate::{
    config::Config,
    error::AppResult,
    ledger::{MemoryTransactionStore, PgTransactionStore, TransactionStore},
    reconcile::{FixedDelay, ReconciliationScheduler},
    stellar::HorizonClient,
};

/// Which backing store a run should use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Empty in-process store, for dry runs against Horizon
    Memory,
}

pub struct Components {
    pub store: Arc<dyn TransactionStore>,
    pub ledger: Arc<HorizonClient>,
}

pub async fn initialize_components(config: &Config, backend: StoreBackend) -> AppResult<Components> {
    info!("Initializing reconciler components ...");

    let store: Arc<dyn TransactionStore> = match backend {
        StoreBackend::Postgres => {
            let pool = initialize_database(&config.database_url).await?;
            Arc::new(PgTransactionStore::new(pool))
        }
        StoreBackend::Memory => {
            info!("⚠️  Using in-memory transaction store, nothing will be persisted");
            Arc::new(MemoryTransactionStore::new())
        }
    };

    let ledger = Arc::new(HorizonClient::new(config.stellar_config())?);

    Ok(Components { store, ledger })
}

pub fn build_scheduler(
    config: &Config,
    components: &Components,
    cancel: watch::Receiver<bool>,
) -> ReconciliationScheduler {
    ReconciliationScheduler::new(components.store.clone(), components.ledger.clone())
        .with_pacer(Arc::new(FixedDelay::new(config.inter_call_delay())))
        .with_recheck_after(config.recheck_after())
        .with_cancellation(cancel)
}

async fn initialize_database(database_url: &str) -> AppResult<PgPool> {
    info!("📊 Connecting to database...");

    // A single sequential worker needs very few connections
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .connect(database_url)
        .await?;

    info!("🔄 Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("✓ Database initialized");
    Ok(pool)
}
