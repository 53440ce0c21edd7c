use super::sequences::Sequences;

use crate::error::LedgerError;
use crate::ids::{AccountId, MovementId, NotificationId, PaymentId, TransferId};
use crate::models::{
    Account, Movement, NewAccount, NewMovement, NewNotification, NewPayment, NewTransfer,
    Notification, Payment, Transfer,
};
use crate::LedgerResult;

use chrono::{DateTime, Utc};

/// Staged writes of one unit of work.
///
/// Holds working copies of the accounts locked for it (ordered by id) and every record it
/// creates. Nothing is visible to other readers until [`super::Store::transaction`] commits it;
/// dropping it discards everything.
#[derive(Debug)]
pub struct Transaction<'s> {
    sequences: &'s Sequences,
    now: DateTime<Utc>,
    pub(super) accounts: Vec<Account>,
    pub(super) opened: Vec<Account>,
    pub(super) movements: Vec<Movement>,
    pub(super) transfers: Vec<Transfer>,
    pub(super) payments: Vec<Payment>,
    pub(super) notifications: Vec<Notification>,
}

impl<'s> Transaction<'s> {
    pub(super) fn new(sequences: &'s Sequences, accounts: Vec<Account>) -> Self {
        Self {
            sequences,
            now: Utc::now(),
            accounts,
            opened: vec![],
            movements: vec![],
            transfers: vec![],
            payments: vec![],
            notifications: vec![],
        }
    }

    /// Timestamp shared by every record of this transaction
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn account(&self, id: AccountId) -> LedgerResult<&Account> {
        let idx = self.position(id)?;
        Ok(&self.accounts[idx])
    }

    pub fn account_mut(&mut self, id: AccountId) -> LedgerResult<&mut Account> {
        let idx = self.position(id)?;
        Ok(&mut self.accounts[idx])
    }

    pub fn open_account(&mut self, new: NewAccount) -> Account {
        let id = AccountId(self.sequences.accounts.next());
        let account = new.into_account(id, self.now);

        self.opened.push(account.clone());

        account
    }

    pub fn record_movement(&mut self, new: NewMovement) -> Movement {
        let id = MovementId(self.sequences.movements.next());
        let movement = new.into_movement(id, self.now);

        self.movements.push(movement.clone());

        movement
    }

    pub fn record_transfer(&mut self, new: NewTransfer) -> Transfer {
        let id = TransferId(self.sequences.transfers.next());
        let transfer = new.into_transfer(id, self.now);

        self.transfers.push(transfer.clone());

        transfer
    }

    pub fn record_payment(&mut self, new: NewPayment) -> Payment {
        let id = PaymentId(self.sequences.payments.next());
        let payment = new.into_payment(id, self.now);

        self.payments.push(payment.clone());

        payment
    }

    pub fn notify(&mut self, new: NewNotification) -> Notification {
        let id = NotificationId(self.sequences.notifications.next());
        let notification = new.into_notification(id, self.now);

        self.notifications.push(notification.clone());

        notification
    }

    fn position(&self, id: AccountId) -> LedgerResult<usize> {
        self.accounts
            .binary_search_by_key(&id, |account| account.id)
            .map_err(|_| {
                LedgerError::Internal(format!("{id} is not locked by this transaction"))
            })
    }
}
