use crate::command::{Command, CommandKind, DepositRequest, PaymentRequest, TransferRequest};
use crate::ids::{Iban, OwnerId};
use crate::models::AccountType;
use crate::{Money, Result};

use serde::Deserialize;

use thiserror::Error;

/// Represents an input row that a CSV record would deserialize into
#[derive(Deserialize, Debug, Clone)]
pub struct InputCommand {
    #[serde(rename = "type")]
    pub typ: InputCommandType,

    pub owner: u32,
    pub account: Option<String>,
    pub counterpart: Option<String>,
    pub amount: Option<String>,
    pub payee: Option<String>,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub account_type: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputCommandType {
    Open,
    Deposit,
    Pay,
    Transfer,
    Close,
    Block,
    Unblock,
}

#[derive(Error, Debug)]
pub enum InputParseError {
    #[error("Error parsing input command: {0} missing from {1:?} row: {2:?}")]
    MissingField(&'static str, InputCommandType, InputCommand),
}

impl InputCommand {
    pub fn parse_command(self) -> Result<Command> {
        let kind = match self.typ {
            InputCommandType::Open => {
                let account_type: AccountType =
                    self.required("account_type", &self.account_type)?.parse()?;
                CommandKind::Open { account_type }
            }
            InputCommandType::Deposit => CommandKind::Deposit(DepositRequest {
                iban: self.account_iban()?,
                amount: self.amount()?,
                description: self.description.clone(),
            }),
            InputCommandType::Pay => CommandKind::Pay(PaymentRequest {
                iban: self.account_iban()?,
                payee: self.required("payee", &self.payee)?.to_string(),
                reference: self.required("reference", &self.reference)?.to_string(),
                amount: self.amount()?,
            }),
            InputCommandType::Transfer => CommandKind::Transfer(TransferRequest {
                source: self.account_iban()?,
                destination: Iban::parse(self.required("counterpart", &self.counterpart)?)?,
                amount: self.amount()?,
                description: self.description.clone(),
            }),
            InputCommandType::Close => CommandKind::Close {
                iban: self.account_iban()?,
            },
            InputCommandType::Block => CommandKind::Block {
                iban: self.account_iban()?,
            },
            InputCommandType::Unblock => CommandKind::Unblock {
                iban: self.account_iban()?,
            },
        };

        Ok(Command {
            owner: OwnerId(self.owner),
            kind,
        })
    }

    fn required<'a>(&self, name: &'static str, field: &'a Option<String>) -> Result<&'a str> {
        let value = field
            .as_deref()
            .ok_or_else(|| InputParseError::MissingField(name, self.typ, self.clone()))?;

        Ok(value)
    }

    fn account_iban(&self) -> Result<Iban> {
        let iban = Iban::parse(self.required("account", &self.account)?)?;
        Ok(iban)
    }

    fn amount(&self) -> Result<Money> {
        let amount = Money::parse(self.required("amount", &self.amount)?)?;
        Ok(amount)
    }
}
