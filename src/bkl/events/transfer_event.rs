use crate::models::{Account, Movement, Transfer};

/// Both sides of a transfer, as committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferEvent {
    pub source: Account,
    pub destination: Account,
    pub transfer: Transfer,
    pub debit: Movement,
    pub credit: Movement,
}
