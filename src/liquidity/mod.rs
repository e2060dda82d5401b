// Account liquidity: reserve accounting over fresh ledger snapshots
pub mod calculator;

pub use calculator::{AssetBalance, LiquidityCalculator, LiquidityReport, ReserveSchedule};

use crate::error::LedgerError;
use crate::stellar::LedgerClient;
use tracing::{info, warn};

/// Fetch `public_key` and compute its liquidity report. Nothing is persisted.
pub async fn check_account(
    client: &dyn LedgerClient,
    calculator: &LiquidityCalculator,
    public_key: &str,
) -> Result<LiquidityReport, LedgerError> {
    let snapshot = client.fetch_account(public_key).await?;
    let report = calculator.report(&snapshot);

    if report.low_balance_warning {
        warn!(
            "⚠️ Low balance on {}: available {} (native {}, reserve {})",
            public_key, report.available_balance, report.native_balance, report.minimum_balance
        );
    } else {
        info!(
            "💵 {} available {} above reserve {}",
            public_key, report.available_balance, report.minimum_balance
        );
    }

    Ok(report)
}
