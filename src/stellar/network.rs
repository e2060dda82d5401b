use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which Stellar network the reconciler talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerEnvironment {
    Testnet,
    Mainnet,
}

impl LedgerEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerEnvironment::Testnet => "testnet",
            LedgerEnvironment::Mainnet => "mainnet",
        }
    }

    pub fn default_horizon_url(&self) -> &'static str {
        match self {
            LedgerEnvironment::Testnet => "https://horizon-testnet.stellar.org",
            LedgerEnvironment::Mainnet => "https://horizon.stellar.org",
        }
    }

    pub fn network_passphrase(&self) -> &'static str {
        match self {
            LedgerEnvironment::Testnet => "Test SDF Network ; September 2015",
            LedgerEnvironment::Mainnet => "Public Global Stellar Network ; September 2015",
        }
    }

    /// Friendbot only exists on the test network
    pub fn friendbot_url(&self) -> Option<&'static str> {
        match self {
            LedgerEnvironment::Testnet => Some("https://friendbot.stellar.org"),
            LedgerEnvironment::Mainnet => None,
        }
    }
}

impl fmt::Display for LedgerEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "testnet" | "test" => Ok(LedgerEnvironment::Testnet),
            "mainnet" | "public" | "pubnet" => Ok(LedgerEnvironment::Mainnet),
            other => Err(format!("unknown ledger environment: {}", other)),
        }
    }
}

/// Connection settings for a Horizon endpoint
#[derive(Debug, Clone)]
pub struct StellarConfig {
    pub environment: LedgerEnvironment,
    pub horizon_url: String,
    pub request_timeout: Duration,
    /// Upper bound on outgoing Horizon requests, shared by all calls
    pub requests_per_minute: Option<u32>,
}

impl StellarConfig {
    pub fn for_environment(environment: LedgerEnvironment) -> Self {
        Self {
            environment,
            horizon_url: environment.default_horizon_url().to_string(),
            request_timeout: Duration::from_secs(10),
            requests_per_minute: None,
        }
    }

    pub fn with_horizon_url(mut self, horizon_url: impl Into<String>) -> Self {
        self.horizon_url = horizon_url.into();
        self
    }
}

impl Default for StellarConfig {
    fn default() -> Self {
        Self::for_environment(LedgerEnvironment::Testnet)
    }
}
