use async_trait::async_trait;
use governor::{clock::DefaultClock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use reqwest::StatusCode;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, info};

use super::network::StellarConfig;
use super::wire;
use crate::error::{AppError, AppResult, LedgerError};
use crate::ledger::models::{AccountSnapshot, LedgerOutcome};

/// Read-only view of the remote ledger
///
/// INVARIANTS:
/// - No side effects beyond the remote call
/// - Every call is bounded by a timeout
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Finality of `tx_hash`. An unknown hash is `Ok(LedgerOutcome::NotFound)`.
    async fn fetch_transaction(&self, tx_hash: &str) -> Result<LedgerOutcome, LedgerError>;

    async fn fetch_account(&self, public_key: &str) -> Result<AccountSnapshot, LedgerError>;
}

type HorizonLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Horizon REST client
pub struct HorizonClient {
    config: StellarConfig,
    http: reqwest::Client,
    limiter: Option<Arc<HorizonLimiter>>,
}

impl HorizonClient {
    pub fn new(config: StellarConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let limiter = match config.requests_per_minute {
            Some(per_minute) => {
                let per_minute = NonZeroU32::new(per_minute).ok_or_else(|| {
                    AppError::Config("requests_per_minute must be greater than zero".to_string())
                })?;
                Some(Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))))
            }
            None => None,
        };

        info!(
            "Horizon client ready: {} ({}, \"{}\")",
            config.horizon_url,
            config.environment,
            config.environment.network_passphrase()
        );

        Ok(Self { config, http, limiter })
    }

    async fn throttle(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    /// GET a Horizon resource. `Ok(None)` means 404.
    async fn get_resource(&self, path: &str) -> Result<Option<String>, LedgerError> {
        self.throttle().await;

        let url = format!("{}/{}", self.config.horizon_url.trim_end_matches('/'), path);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        resource_body(status, body)
    }

    /// Fund `public_key` with test lumens through Friendbot.
    ///
    /// Provisioning helper, the reconciliation loop never calls it.
    pub async fn fund_test_account(&self, public_key: &str) -> AppResult<Option<String>> {
        let friendbot = self.config.environment.friendbot_url().ok_or_else(|| {
            AppError::Config(format!(
                "Friendbot is not available on {}",
                self.config.environment
            ))
        })?;

        self.throttle().await;

        let response = self
            .http
            .get(friendbot)
            .query(&[("addr", public_key)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LedgerError::Malformed(format!("Friendbot returned {}: {}", status, body)).into());
        }

        let json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| LedgerError::Malformed(format!("friendbot body: {}", e)))?;

        let tx_hash = json["hash"].as_str().map(str::to_string);
        info!("Funded test account {} (tx: {:?})", public_key, tx_hash);

        Ok(tx_hash)
    }
}

#[async_trait]
impl LedgerClient for HorizonClient {
    async fn fetch_transaction(&self, tx_hash: &str) -> Result<LedgerOutcome, LedgerError> {
        validate_tx_hash(tx_hash)?;

        let body = self.get_resource(&format!("transactions/{}", tx_hash)).await?;
        transaction_outcome(body.as_deref())
    }

    async fn fetch_account(&self, public_key: &str) -> Result<AccountSnapshot, LedgerError> {
        let body = self.get_resource(&format!("accounts/{}", public_key)).await?;
        account_snapshot(body.as_deref(), public_key)
    }
}

/// Body of a Horizon response, `None` when the resource does not exist
fn resource_body(status: StatusCode, body: String) -> Result<Option<String>, LedgerError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    match classify_failure(status) {
        Some(err) => Err(err),
        None => Ok(Some(body)),
    }
}

/// An unknown transaction is an outcome, not an error
fn transaction_outcome(body: Option<&str>) -> Result<LedgerOutcome, LedgerError> {
    match body {
        Some(body) => wire::parse_transaction(body),
        None => Ok(LedgerOutcome::NotFound),
    }
}

fn account_snapshot(body: Option<&str>, public_key: &str) -> Result<AccountSnapshot, LedgerError> {
    match body {
        Some(body) => wire::parse_account(body, public_key),
        None => Err(LedgerError::NotFound(public_key.to_string())),
    }
}

/// Map a non-404 HTTP status to a ledger error, `None` for success
fn classify_failure(status: StatusCode) -> Option<LedgerError> {
    if status.is_success() {
        None
    } else if status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
    {
        Some(LedgerError::Transient(format!("Horizon returned {}", status)))
    } else {
        Some(LedgerError::Malformed(format!("unexpected Horizon status {}", status)))
    }
}

/// Transaction hashes are 32 bytes, hex encoded
fn validate_tx_hash(tx_hash: &str) -> Result<(), LedgerError> {
    match hex::decode(tx_hash) {
        Ok(bytes) if bytes.len() == 32 => Ok(()),
        _ => Err(LedgerError::Malformed(format!("invalid transaction hash: {}", tx_hash))),
    }
}
