pub mod memory;
pub mod models;
pub mod repository;

pub use memory::MemoryTransactionStore;
pub use repository::{PgTransactionStore, StoreResult, TransactionStore, UpdateOutcome};
