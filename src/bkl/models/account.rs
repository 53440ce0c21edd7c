use crate::error::LedgerError;
use crate::ids::{AccountId, Iban, OwnerId};
use crate::{LedgerResult, Money};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Other,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Other => "other",
        };

        return write!(f, "{name}");
    }
}

impl FromStr for AccountType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "other" => Ok(Self::Other),
            _ => Err(LedgerError::Validation(format!("Unknown account type: {s:?}"))),
        }
    }
}

/// Account lifecycle:
///
/// Active
/// -> block: Blocked
/// -> close (zero balance): Closed
///
/// Blocked
/// -> unblock: Active
/// -> close (zero balance): Closed
///
/// Closed
/// -> _
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountStatus {
    Active,
    Blocked,
    Closed,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{self:?}");
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub owner: OwnerId,
    pub iban: Iban,
    pub account_type: AccountType,
    pub balance: Money,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// An account waiting for an identifier; always starts Active with a zero balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub owner: OwnerId,
    pub iban: Iban,
    pub account_type: AccountType,
}

impl NewAccount {
    pub fn into_account(self, id: AccountId, created_at: DateTime<Utc>) -> Account {
        Account {
            id,
            owner: self.owner,
            iban: self.iban,
            account_type: self.account_type,
            balance: Money::ZERO,
            status: AccountStatus::Active,
            created_at,
            closed_at: None,
        }
    }
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn ensure_active(&self) -> LedgerResult {
        if !self.is_active() {
            return Err(LedgerError::InvalidState(format!(
                "Account {} is {}",
                self.iban, self.status
            )));
        }

        Ok(())
    }

    /// Accounts are only visible to their owner
    pub fn ensure_owned_by(&self, owner: OwnerId) -> LedgerResult {
        if self.owner != owner {
            return Err(LedgerError::NotFound(format!("Account not found: {}", self.iban)));
        }

        Ok(())
    }

    pub fn credit(&mut self, amount: Money) -> LedgerResult {
        self.ensure_active()?;
        self.balance.add(&amount)?;

        Ok(())
    }

    /// Debits `amount`, refusing to take the balance below zero
    pub fn debit(&mut self, amount: Money) -> LedgerResult {
        self.ensure_active()?;

        if self.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                iban: self.iban.clone(),
                balance: self.balance,
                requested: amount,
            });
        }

        self.balance.sub(&amount)?;

        Ok(())
    }

    pub fn close(&mut self, at: DateTime<Utc>) -> LedgerResult {
        if self.status == AccountStatus::Closed {
            return Err(LedgerError::InvalidState(format!(
                "Account {} is already closed",
                self.iban
            )));
        }

        if !self.balance.is_zero() {
            return Err(LedgerError::InvalidState(format!(
                "Account {} must have a zero balance to be closed, balance is {}",
                self.iban, self.balance
            )));
        }

        self.status = AccountStatus::Closed;
        self.closed_at = Some(at);

        Ok(())
    }

    pub fn block(&mut self) -> LedgerResult {
        self.ensure_active()?;
        self.status = AccountStatus::Blocked;

        Ok(())
    }

    pub fn unblock(&mut self) -> LedgerResult {
        if self.status != AccountStatus::Blocked {
            return Err(LedgerError::InvalidState(format!(
                "Account {} is {}, not Blocked",
                self.iban, self.status
            )));
        }

        self.status = AccountStatus::Active;

        Ok(())
    }
}
