use crate::ids::{AccountId, PaymentId};
use crate::Money;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: PaymentId,
    pub account_id: AccountId,
    pub payee: String,
    pub reference: String,
    pub amount: Money,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub account_id: AccountId,
    pub payee: String,
    pub reference: String,
    pub amount: Money,
}

impl NewPayment {
    pub fn into_payment(self, id: PaymentId, at: DateTime<Utc>) -> Payment {
        Payment {
            id,
            account_id: self.account_id,
            payee: self.payee,
            reference: self.reference,
            amount: self.amount,
            at,
        }
    }
}
