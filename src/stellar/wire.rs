// Horizon response bodies and their conversion into ledger models

use crate::error::LedgerError;
use crate::ledger::models::{AccountSnapshot, Asset, LedgerOutcome};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// `GET /transactions/{hash}`
#[derive(Debug, Deserialize)]
pub struct HorizonTransaction {
    hash: String,
    successful: bool,
    #[serde(default)]
    ledger: Option<u64>,
}

impl HorizonTransaction {
    pub fn outcome(&self) -> LedgerOutcome {
        if self.successful {
            LedgerOutcome::Success
        } else {
            LedgerOutcome::Failed
        }
    }
}

/// Horizon encodes 64-bit integers as strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrInt {
    Int(i64),
    Str(String),
}

impl StringOrInt {
    fn into_i64(self, field: &str) -> Result<i64, LedgerError> {
        match self {
            StringOrInt::Int(value) => Ok(value),
            StringOrInt::Str(raw) => raw
                .parse::<i64>()
                .map_err(|_| LedgerError::Malformed(format!("invalid {}: {}", field, raw))),
        }
    }
}

/// `GET /accounts/{id}`
#[derive(Debug, Deserialize)]
pub struct HorizonAccount {
    #[serde(default)]
    account_id: Option<String>,
    sequence: StringOrInt,
    subentry_count: u32,
    balances: Vec<HorizonBalance>,
}

#[derive(Debug, Deserialize)]
pub struct HorizonBalance {
    pub balance: String,
    pub asset_type: String,
    #[serde(default)]
    pub asset_code: Option<String>,
    #[serde(default)]
    pub asset_issuer: Option<String>,
    #[serde(default)]
    pub liquidity_pool_id: Option<String>,
}

impl HorizonBalance {
    fn asset(&self) -> Result<Asset, LedgerError> {
        match self.asset_type.as_str() {
            "native" => Ok(Asset::Native),
            "credit_alphanum4" | "credit_alphanum12" | "issued" => {
                match (&self.asset_code, &self.asset_issuer) {
                    (Some(code), Some(issuer)) => Ok(Asset::Issued {
                        code: code.clone(),
                        issuer: issuer.clone(),
                    }),
                    _ => Err(LedgerError::Malformed(format!(
                        "{} balance without asset_code/asset_issuer",
                        self.asset_type
                    ))),
                }
            }
            "liquidity_pool_shares" => match &self.liquidity_pool_id {
                Some(pool_id) => Ok(Asset::PoolShare {
                    pool_id: pool_id.clone(),
                }),
                None => Err(LedgerError::Malformed(
                    "pool share balance without liquidity_pool_id".to_string(),
                )),
            },
            other => Err(LedgerError::Malformed(format!("unknown asset_type: {}", other))),
        }
    }
}

impl HorizonAccount {
    pub fn into_snapshot(self, requested_key: &str) -> Result<AccountSnapshot, LedgerError> {
        let sequence_number = self.sequence.into_i64("sequence")?;

        let mut balances = BTreeMap::new();
        for entry in &self.balances {
            let asset = entry.asset()?;
            let amount = Decimal::from_str(&entry.balance)?;
            if balances.insert(asset.clone(), amount).is_some() {
                return Err(LedgerError::Malformed(format!("duplicate balance for {}", asset)));
            }
        }

        Ok(AccountSnapshot {
            public_key: self.account_id.unwrap_or_else(|| requested_key.to_string()),
            sequence_number,
            subentry_count: self.subentry_count,
            balances,
        })
    }
}

pub fn parse_transaction(body: &str) -> Result<LedgerOutcome, LedgerError> {
    let tx: HorizonTransaction = serde_json::from_str(body)
        .map_err(|e| LedgerError::Malformed(format!("transaction body: {}", e)))?;
    let outcome = tx.outcome();
    debug!(tx_hash = %tx.hash, ledger = ?tx.ledger, "Horizon reports {}", outcome);
    Ok(outcome)
}

pub fn parse_account(body: &str, requested_key: &str) -> Result<AccountSnapshot, LedgerError> {
    let account: HorizonAccount = serde_json::from_str(body)
        .map_err(|e| LedgerError::Malformed(format!("account body: {}", e)))?;
    account.into_snapshot(requested_key)
}
