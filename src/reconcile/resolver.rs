use crate::ledger::models::{LedgerOutcome, TransactionRecord, TransactionStatus};

/// Next status for a record plus whether it differs from the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub next_status: TransactionStatus,
    pub changed: bool,
}

impl Resolution {
    fn unchanged(status: TransactionStatus) -> Self {
        Self {
            next_status: status,
            changed: false,
        }
    }

    fn transition(status: TransactionStatus) -> Self {
        Self {
            next_status: status,
            changed: true,
        }
    }
}

/// Decide the next local status from a ledger answer.
///
/// Rules, first match wins:
/// 1. terminal records never move
/// 2. `Success` confirms
/// 3. `Failed` fails
/// 4. `NotFound` at or past `max_age_seconds` expires
/// 5. `NotFound` before that stays pending
///
/// Transport errors never reach this function; the scheduler counts them
/// as failures and leaves the record alone.
pub fn resolve(
    current: &TransactionRecord,
    outcome: LedgerOutcome,
    age_seconds: i64,
    max_age_seconds: i64,
) -> Resolution {
    if current.status.is_terminal() {
        return Resolution::unchanged(current.status);
    }

    match outcome {
        LedgerOutcome::Success => Resolution {
            next_status: TransactionStatus::Confirmed,
            changed: current.status != TransactionStatus::Confirmed,
        },
        LedgerOutcome::Failed => Resolution::transition(TransactionStatus::Failed),
        LedgerOutcome::NotFound if age_seconds >= max_age_seconds => {
            Resolution::transition(TransactionStatus::Expired)
        }
        LedgerOutcome::NotFound => Resolution::unchanged(TransactionStatus::Pending),
    }
}
