pub mod bootstrap;
pub mod config;
pub mod error;
pub mod ledger;
pub mod liquidity;
pub mod reconcile;
pub mod stellar;
