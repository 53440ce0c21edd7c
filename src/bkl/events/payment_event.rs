use crate::models::{Account, Movement, Payment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEvent {
    pub account: Account,
    pub payment: Payment,
    pub movement: Movement,
}
