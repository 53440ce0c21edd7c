pub mod account_report;
pub mod command;
pub mod config;
mod error;
pub mod events;
pub mod ids;
pub mod input;
pub mod ledger;
pub mod models;
mod money;
pub mod notifications;
mod result;
pub mod services;
pub mod store;

pub use account_report::AccountReport;
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use ledger::Ledger;
pub use money::{Money, MoneyError};
pub use result::{LedgerResult, Result};

use std::sync::Arc;

/// Every service of one ledger, sharing a single store
pub struct Bank {
    pub ledger: services::LedgerService,
    pub accounts: services::AccountService,
    pub movements: services::MovementService,
    pub notifications: services::NotificationService,
    pub audit: services::AuditService,
}

pub fn build_bank(config: LedgerConfig) -> LedgerResult<Bank> {
    let store = Arc::new(store::Store::new(config.lock_timeout));

    let accounts = services::AccountService::new(store.clone());
    let movements = services::MovementService::new(store.clone(), config.statement_window_days);
    let notifications = services::NotificationService::new(store.clone());
    let audit = services::AuditService::new(store.clone());
    let ledger = services::LedgerService::new(store, config)?;

    return Ok(Bank {
        ledger,
        accounts,
        movements,
        notifications,
        audit,
    });
}
