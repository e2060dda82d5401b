// Ledger reconciliation: status resolution and the batch scheduler
pub mod pacing;
pub mod resolver;
pub mod scheduler;

pub use pacing::{Clock, FixedDelay, ManualClock, NoDelay, Pacer, SystemClock};
pub use resolver::{resolve, Resolution};
pub use scheduler::{ReconciliationScheduler, RunSummary};
