mod account;
mod audit_entry;
mod movement;
mod notification;
mod payment;
mod statement;
mod transfer;

pub use account::{Account, AccountStatus, AccountType, NewAccount};
pub use audit_entry::{AuditEntry, NewAuditEntry};
pub use movement::{Direction, Movement, NewMovement};
pub use notification::{NewNotification, Notification};
pub use payment::{NewPayment, Payment};
pub use statement::Statement;
pub use transfer::{NewTransfer, Transfer};
