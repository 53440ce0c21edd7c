use super::Movement;

use crate::ids::Iban;
use crate::Money;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Account activity over a period, newest movement first.
///
/// `opening_balance + total_credits - total_debits == closing_balance`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub iban: Iban,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub opening_balance: Money,
    pub closing_balance: Money,
    pub total_credits: Money,
    pub total_debits: Money,
    pub movements: Vec<Movement>,
}
