use crate::models::Account;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Closed,
    Blocked,
    Unblocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangedEvent {
    pub account: Account,
    pub change: StatusChange,
}
