use crate::models::Account;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOpenedEvent {
    pub account: Account,
}
