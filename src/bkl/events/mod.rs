mod account_opened_event;
mod deposit_event;
mod payment_event;
mod status_changed_event;
mod transfer_event;

pub use account_opened_event::AccountOpenedEvent;
pub use deposit_event::DepositEvent;
pub use payment_event::PaymentEvent;
pub use status_changed_event::{StatusChange, StatusChangedEvent};
pub use transfer_event::TransferEvent;

/// Typed outcome of a committed ledger operation, forcing correct handling through the type-system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    AccountOpened(AccountOpenedEvent),
    Deposit(DepositEvent),
    Payment(PaymentEvent),
    Transfer(TransferEvent),
    StatusChanged(StatusChangedEvent),
}
