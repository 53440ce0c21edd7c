use crate::ids::{AccountId, MovementId};
use crate::Money;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Credit,
    Debit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{self:?}");
    }
}

/// Single-sided ledger entry against one account. Never mutated once recorded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub id: MovementId,
    pub account_id: AccountId,
    pub direction: Direction,
    pub amount: Money,
    pub at: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
    pub account_id: AccountId,
    pub direction: Direction,
    pub amount: Money,
    pub description: String,
}

impl NewMovement {
    pub fn credit(account_id: AccountId, amount: Money, description: String) -> Self {
        Self {
            account_id,
            direction: Direction::Credit,
            amount,
            description,
        }
    }

    pub fn debit(account_id: AccountId, amount: Money, description: String) -> Self {
        Self {
            account_id,
            direction: Direction::Debit,
            amount,
            description,
        }
    }

    pub fn into_movement(self, id: MovementId, at: DateTime<Utc>) -> Movement {
        Movement {
            id,
            account_id: self.account_id,
            direction: self.direction,
            amount: self.amount,
            at,
            description: self.description,
        }
    }
}

impl Movement {
    /// Effect of this movement on its account's balance
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => Money(-self.amount.0),
        }
    }
}
