use crate::stellar::{LedgerEnvironment, StellarConfig};
use config::{ConfigError, Environment};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use std::time::Duration;

/// Upper bound for `RECHECK_AFTER_SECONDS` (about ten years)
const MAX_RECHECK_AFTER_SECONDS: i64 = 10 * 365 * 24 * 3600;

/// Reconciler settings, read from the process environment (and `.env`)
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database_url: String,
    #[serde(deserialize_with = "environment_from_str")]
    pub ledger_environment: LedgerEnvironment,
    /// Overrides the environment's default Horizon endpoint
    #[serde(default)]
    pub horizon_url: Option<String>,
    /// Expiry window for transactions the ledger has never seen
    pub max_age_seconds: i64,
    pub batch_limit: usize,
    pub inter_call_delay_ms: u64,
    /// Eligibility window: records checked more recently are skipped
    pub recheck_after_seconds: i64,
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub ledger_requests_per_minute: Option<u32>,
    #[serde(deserialize_with = "decimal_from_str")]
    pub low_balance_threshold: Decimal,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::default())
    }

    fn load(source: Environment) -> Result<Self, ConfigError> {
        let config: Config = config::Config::builder()
            .set_default("database_url", "postgresql://localhost/reconciler")?
            .set_default("ledger_environment", "testnet")?
            .set_default("max_age_seconds", 3600)?
            .set_default("batch_limit", 50)?
            .set_default("inter_call_delay_ms", 200)?
            .set_default("recheck_after_seconds", 0)?
            .set_default("request_timeout_secs", 10)?
            .set_default("low_balance_threshold", "1.0")?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_age_seconds <= 0 {
            return Err(ConfigError::Message("MAX_AGE_SECONDS must be positive".to_string()));
        }
        if self.batch_limit == 0 {
            return Err(ConfigError::Message("BATCH_LIMIT must be positive".to_string()));
        }
        if !(0..=MAX_RECHECK_AFTER_SECONDS).contains(&self.recheck_after_seconds) {
            return Err(ConfigError::Message(format!(
                "RECHECK_AFTER_SECONDS must be between 0 and {}",
                MAX_RECHECK_AFTER_SECONDS
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Message("REQUEST_TIMEOUT_SECS must be positive".to_string()));
        }
        Ok(())
    }

    /// Apply per-run overrides, subject to the same checks as the environment
    pub fn with_pass_overrides(
        mut self,
        max_age_seconds: Option<i64>,
        batch_limit: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if let Some(max_age_seconds) = max_age_seconds {
            self.max_age_seconds = max_age_seconds;
        }
        if let Some(batch_limit) = batch_limit {
            self.batch_limit = batch_limit;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn stellar_config(&self) -> StellarConfig {
        let mut stellar = StellarConfig::for_environment(self.ledger_environment);
        if let Some(url) = &self.horizon_url {
            stellar = stellar.with_horizon_url(url.clone());
        }
        stellar.request_timeout = Duration::from_secs(self.request_timeout_secs);
        stellar.requests_per_minute = self.ledger_requests_per_minute;
        stellar
    }

    pub fn inter_call_delay(&self) -> Duration {
        Duration::from_millis(self.inter_call_delay_ms)
    }

    pub fn recheck_after(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.recheck_after_seconds)
    }
}

fn environment_from_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LedgerEnvironment, D::Error> {
    let raw = String::deserialize(deserializer)?;
    LedgerEnvironment::from_str(&raw).map_err(serde::de::Error::custom)
}

fn decimal_from_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Decimal::from_str(raw.trim()).map_err(serde::de::Error::custom)
}
