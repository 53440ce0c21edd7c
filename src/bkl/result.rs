use crate::error::LedgerError;

/// Convenience type to make error mapping cleaner
pub type Result<T = ()> = anyhow::Result<T>;

/// Result of every ledger, store and projection operation
pub type LedgerResult<T = ()> = std::result::Result<T, LedgerError>;
