use crate::models::{Account, Movement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositEvent {
    pub account: Account,
    pub movement: Movement,
}
