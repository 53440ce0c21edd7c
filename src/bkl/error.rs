use crate::ids::Iban;
use crate::money::MoneyError;
use crate::Money;

use thiserror::Error;

/// Distinct, user-actionable outcomes of a rejected operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Insufficient funds on {iban}: balance is {balance}, requested {requested}")]
    InsufficientFunds {
        iban: Iban,
        balance: Money,
        requested: Money,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Exclusive access to an account could not be acquired in time
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Uniqueness violation on the external identifier
    #[error("IBAN already registered: {0}")]
    DuplicateIban(Iban),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Only lock conflicts are safe to retry, since an aborted attempt leaves no writes behind
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<MoneyError> for LedgerError {
    fn from(e: MoneyError) -> Self {
        match e {
            MoneyError::Parse(..) => Self::Validation(e.to_string()),
            MoneyError::Overflow(..) | MoneyError::Underflow(..) => Self::Internal(e.to_string()),
        }
    }
}
