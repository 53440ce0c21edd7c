use crate::ids::{Iban, OwnerId};
use crate::models::{Account, AccountType, Movement, Payment, Transfer};
use crate::Money;

/// A balance- or status-changing request, issued on behalf of an authenticated owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub owner: OwnerId,
    pub kind: CommandKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Open { account_type: AccountType },
    Deposit(DepositRequest),
    Pay(PaymentRequest),
    Transfer(TransferRequest),
    Close { iban: Iban },
    Block { iban: Iban },
    Unblock { iban: Iban },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositRequest {
    pub iban: Iban,
    pub amount: Money,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub iban: Iban,
    pub payee: String,
    pub reference: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub source: Iban,
    pub destination: Iban,
    pub amount: Money,
    pub description: Option<String>,
}

/// What a successfully executed command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Opened(Account),
    Deposited(Movement),
    Paid(Payment),
    Transferred(Transfer),
    StatusChanged(Account),
}
