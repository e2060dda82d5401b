use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, Type};
use std::collections::BTreeMap;
use std::fmt;

/// Local finality status of a submitted transaction
///
/// INVARIANT: only `Pending` may transition; terminal states are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "ledger_tx_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
    Expired,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Expired => "expired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }

    pub fn all() -> [TransactionStatus; 4] {
        [
            TransactionStatus::Pending,
            TransactionStatus::Confirmed,
            TransactionStatus::Failed,
            TransactionStatus::Expired,
        ]
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A payment transaction tracked against the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TransactionRecord {
    pub tx_hash: String,
    pub status: TransactionStatus,
    pub previous_status: Option<TransactionStatus>,
    pub created_at: DateTime<Utc>,
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl TransactionRecord {
    /// Fresh pending record, as written by the submission path
    pub fn pending(tx_hash: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            status: TransactionStatus::Pending,
            previous_status: None,
            created_at,
            last_checked_at: None,
        }
    }

    /// Whole seconds elapsed since creation, never negative
    pub fn age_seconds(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_seconds().max(0)
    }
}

/// Finality answer returned by the ledger for one transaction hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerOutcome {
    Success,
    Failed,
    NotFound,
}

impl fmt::Display for LedgerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LedgerOutcome::Success => "success",
            LedgerOutcome::Failed => "failed",
            LedgerOutcome::NotFound => "not_found",
        };
        f.write_str(label)
    }
}

/// Asset identifier as held in an account's balance list
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Asset {
    Native,
    Issued { code: String, issuer: String },
    PoolShare { pool_id: String },
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Native => write!(f, "XLM"),
            Asset::Issued { code, issuer } => write!(f, "{}:{}", code, issuer),
            Asset::PoolShare { pool_id } => write!(f, "pool:{}", pool_id),
        }
    }
}

/// Point-in-time view of a ledger account. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub public_key: String,
    pub sequence_number: i64,
    pub subentry_count: u32,
    pub balances: BTreeMap<Asset, Decimal>,
}

impl AccountSnapshot {
    pub fn native_balance(&self) -> Decimal {
        self.balances
            .get(&Asset::Native)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}
