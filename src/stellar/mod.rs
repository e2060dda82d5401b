// Stellar Horizon access: the ledger side of reconciliation
pub mod client;
pub mod network;
pub mod wire;

pub use client::{HorizonClient, LedgerClient};
pub use network::{LedgerEnvironment, StellarConfig};
