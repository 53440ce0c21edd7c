mod account_service;
mod audit_service;
mod ledger_service;
mod movement_service;
mod notification_service;

pub use account_service::AccountService;
pub use audit_service::AuditService;
pub use ledger_service::LedgerService;
pub use movement_service::MovementService;
pub use notification_service::NotificationService;
