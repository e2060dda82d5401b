use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::ledger::models::{AccountSnapshot, Asset};

/// Native-asset reserve every account must keep locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveSchedule {
    pub base_reserve: Decimal,
    /// Charged once per subentry (trustline, offer, signer, data entry)
    pub entry_reserve: Decimal,
}

impl Default for ReserveSchedule {
    fn default() -> Self {
        Self {
            base_reserve: dec!(1.0),
            entry_reserve: dec!(0.5),
        }
    }
}

impl ReserveSchedule {
    pub fn minimum_balance(&self, subentry_count: u32) -> Decimal {
        self.base_reserve + Decimal::from(subentry_count) * self.entry_reserve
    }
}

/// Any non-native holding: issued assets and liquidity pool shares
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetBalance {
    pub asset: Asset,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
}

/// Spendable-balance view of one account snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiquidityReport {
    pub public_key: String,
    pub sequence_number: i64,
    pub subentry_count: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub native_balance: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub minimum_balance: Decimal,
    /// Negative when the account sits below its reserve
    #[serde(with = "rust_decimal::serde::str")]
    pub available_balance: Decimal,
    pub low_balance_warning: bool,
    pub other_balances: Vec<AssetBalance>,
}

#[derive(Debug, Clone)]
pub struct LiquidityCalculator {
    reserves: ReserveSchedule,
    low_balance_threshold: Decimal,
}

impl Default for LiquidityCalculator {
    fn default() -> Self {
        Self::new(ReserveSchedule::default(), dec!(1.0))
    }
}

impl LiquidityCalculator {
    pub fn new(reserves: ReserveSchedule, low_balance_threshold: Decimal) -> Self {
        Self {
            reserves,
            low_balance_threshold,
        }
    }

    pub fn with_threshold(low_balance_threshold: Decimal) -> Self {
        Self::new(ReserveSchedule::default(), low_balance_threshold)
    }

    pub fn minimum_balance(&self, subentry_count: u32) -> Decimal {
        self.reserves.minimum_balance(subentry_count)
    }

    pub fn report(&self, snapshot: &AccountSnapshot) -> LiquidityReport {
        let native_balance = snapshot.native_balance();
        let minimum_balance = self.minimum_balance(snapshot.subentry_count);
        let available_balance = native_balance - minimum_balance;

        let other_balances = snapshot
            .balances
            .iter()
            .filter_map(|(asset, balance)| match asset {
                Asset::Native => None,
                Asset::Issued { .. } | Asset::PoolShare { .. } => Some(AssetBalance {
                    asset: asset.clone(),
                    balance: *balance,
                }),
            })
            .collect();

        LiquidityReport {
            public_key: snapshot.public_key.clone(),
            sequence_number: snapshot.sequence_number,
            subentry_count: snapshot.subentry_count,
            native_balance,
            minimum_balance,
            available_balance,
            low_balance_warning: available_balance < self.low_balance_threshold,
            other_balances,
        }
    }
}
