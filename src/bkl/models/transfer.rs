use crate::ids::{AccountId, TransferId};
use crate::Money;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logical money transfer; its two movements are recorded alongside it
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub id: TransferId,
    pub source: AccountId,
    pub destination: AccountId,
    pub amount: Money,
    pub at: DateTime<Utc>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransfer {
    pub source: AccountId,
    pub destination: AccountId,
    pub amount: Money,
    pub description: Option<String>,
}

impl NewTransfer {
    pub fn into_transfer(self, id: TransferId, at: DateTime<Utc>) -> Transfer {
        Transfer {
            id,
            source: self.source,
            destination: self.destination,
            amount: self.amount,
            at,
            description: self.description,
        }
    }
}
