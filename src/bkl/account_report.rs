use crate::models::Account;

use serde::{Deserialize, Serialize};

/// One CSV row of the end-of-run account report
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AccountReport {
    pub iban: String,
    pub owner: u32,
    pub account_type: String,
    pub status: String,
    pub balance: String,
}

impl From<&Account> for AccountReport {
    fn from(account: &Account) -> Self {
        return Self {
            iban: account.iban.to_string(),
            owner: account.owner.0,
            account_type: account.account_type.to_string(),
            status: account.status.to_string(),
            balance: account.balance.to_string(),
        };
    }
}
