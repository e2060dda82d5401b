use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use ledger_reconciler::{
    bootstrap::{self, StoreBackend},
    config::Config,
    liquidity::{self, LiquidityCalculator},
};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Keeps local payment records in step with Stellar ledger finality
#[derive(Parser, Debug)]
#[command(name = "reconciler")]
struct Cli {
    /// Use an in-memory transaction store instead of PostgreSQL
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single reconciliation pass (default)
    Reconcile(PassArgs),
    /// Run reconciliation passes on a fixed interval until Ctrl-C
    Watch {
        #[arg(long, default_value = "60")]
        interval_secs: u64,
        #[command(flatten)]
        pass: PassArgs,
    },
    /// Print the reserve and spendable balance of an account
    Liquidity { public_key: String },
    /// Fund a testnet account through Friendbot
    Fund { public_key: String },
}

#[derive(Args, Debug, Default)]
struct PassArgs {
    /// Expire unknown transactions older than this
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    max_age_seconds: Option<i64>,
    /// Maximum records per pass
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    batch_limit: Option<usize>,
}

// Initialize logging and tracing
fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,ledger_reconciler=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Raise the cancel flag on Ctrl-C
fn cancel_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("⏹️ Ctrl-C received, stopping after the current transaction");
            let _ = tx.send(true);
        }
    });
    rx
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env().context("invalid configuration")?;
    let backend = if cli.memory {
        StoreBackend::Memory
    } else {
        StoreBackend::Postgres
    };

    info!("🚀 Starting ledger reconciler on {}", config.ledger_environment);

    match cli.command.unwrap_or(Command::Reconcile(PassArgs::default())) {
        Command::Reconcile(pass) => {
            let config = config
                .with_pass_overrides(pass.max_age_seconds, pass.batch_limit)
                .context("invalid pass arguments")?;
            let components = bootstrap::initialize_components(&config, backend).await?;
            let scheduler = bootstrap::build_scheduler(&config, &components, cancel_on_ctrl_c());

            let summary = scheduler
                .run_once(config.max_age_seconds, config.batch_limit)
                .await?;

            println!("{}", summary);
        }
        Command::Watch { interval_secs, pass } => {
            let config = config
                .with_pass_overrides(pass.max_age_seconds, pass.batch_limit)
                .context("invalid pass arguments")?;
            let components = bootstrap::initialize_components(&config, backend).await?;
            let scheduler = bootstrap::build_scheduler(&config, &components, cancel_on_ctrl_c());

            scheduler
                .run_periodic(
                    Duration::from_secs(interval_secs.max(1)),
                    config.max_age_seconds,
                    config.batch_limit,
                )
                .await?;
        }
        Command::Liquidity { public_key } => {
            let components = bootstrap::initialize_components(&config, StoreBackend::Memory).await?;
            let calculator = LiquidityCalculator::with_threshold(config.low_balance_threshold);

            let report = liquidity::check_account(components.ledger.as_ref(), &calculator, &public_key).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Fund { public_key } => {
            let components = bootstrap::initialize_components(&config, StoreBackend::Memory).await?;

            match components.ledger.fund_test_account(&public_key).await? {
                Some(tx_hash) => println!("funded {} in {}", public_key, tx_hash),
                None => println!("funded {}", public_key),
            }
        }
    }

    Ok(())
}
