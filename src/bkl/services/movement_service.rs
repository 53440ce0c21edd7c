use crate::error::LedgerError;
use crate::ids::{AccountId, Iban, MovementId, OwnerId};
use crate::models::{Account, Direction, Movement, Payment, Statement, Transfer};
use crate::store::Store;
use crate::{LedgerResult, Money};

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

/// Read-only history views: movements, statements, payments and transfers.
///
/// Accounts are resolved (and ownership checked) before the committed records are read, so no
/// account lock is ever taken while the records are borrowed.
pub struct MovementService {
    store: Arc<Store>,
    statement_window_days: i64,
}

impl MovementService {
    pub fn new(store: Arc<Store>, statement_window_days: i64) -> Self {
        return Self {
            store,
            statement_window_days,
        };
    }

    /// Movements of one of the owner's accounts, newest first
    pub fn movements(&self, owner: OwnerId, iban: &Iban) -> LedgerResult<Vec<Movement>> {
        let account = self.owned_account(owner, iban)?;

        let movements = self.store.read_records(|records| {
            records
                .movements()
                .movements_for(account.id)
                .into_iter()
                .cloned()
                .collect()
        });

        Ok(newest_first(movements))
    }

    /// Movements across all of the owner's accounts, newest first
    pub fn all_movements(&self, owner: OwnerId) -> LedgerResult<Vec<Movement>> {
        self.owner_movements(owner, |_| true)
    }

    /// Movements across all of the owner's accounts with `from <= at <= to`, newest first
    pub fn movements_between(
        &self,
        owner: OwnerId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> LedgerResult<Vec<Movement>> {
        ensure_ordered(from, to)?;

        self.owner_movements(owner, |movement| movement.at >= from && movement.at <= to)
    }

    pub fn movements_by_direction(
        &self,
        owner: OwnerId,
        direction: Direction,
    ) -> LedgerResult<Vec<Movement>> {
        self.owner_movements(owner, |movement| movement.direction == direction)
    }

    pub fn movement(&self, owner: OwnerId, id: MovementId) -> LedgerResult<Movement> {
        let owned = self.owned_account_ids(owner)?;

        self.store
            .read_records(|records| records.movements().get(&id).cloned())
            .filter(|movement| owned.contains(&movement.account_id))
            .ok_or_else(|| LedgerError::NotFound(format!("Movement not found: {id}")))
    }

    /// Activity of one account over `[from, to]`.
    ///
    /// `to` defaults to now and `from` to the configured window before `to`. Balances are
    /// replayed from the movement ledger, so they are consistent with the listed movements even
    /// while other operations commit.
    pub fn statement(
        &self,
        owner: OwnerId,
        iban: &Iban,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> LedgerResult<Statement> {
        let account = self.owned_account(owner, iban)?;

        let to = to.unwrap_or_else(Utc::now);
        let from = match from {
            Some(from) => from,
            None => self.window_start(to)?,
        };
        ensure_ordered(from, to)?;

        let history: Vec<Movement> = self.store.read_records(|records| {
            records
                .movements()
                .movements_for(account.id)
                .into_iter()
                .filter(|movement| movement.at <= to)
                .cloned()
                .collect()
        });

        let mut closing_balance = Money::ZERO;
        let mut total_credits = Money::ZERO;
        let mut total_debits = Money::ZERO;
        let mut movements = vec![];

        for movement in history {
            closing_balance.add(&movement.signed_amount())?;

            if movement.at < from {
                continue;
            }

            match movement.direction {
                Direction::Credit => total_credits.add(&movement.amount)?,
                Direction::Debit => total_debits.add(&movement.amount)?,
            }

            movements.push(movement);
        }

        let opening_balance = closing_balance
            .checked_sub(total_credits)?
            .checked_add(total_debits)?;

        Ok(Statement {
            iban: account.iban,
            from,
            to,
            opening_balance,
            closing_balance,
            total_credits,
            total_debits,
            movements: newest_first(movements),
        })
    }

    /// Payments made from any of the owner's accounts, newest first
    pub fn payments(&self, owner: OwnerId) -> LedgerResult<Vec<Payment>> {
        let owned = self.owned_account_ids(owner)?;

        let mut payments: Vec<Payment> = self.store.read_records(|records| {
            records
                .payments()
                .iter()
                .filter(|payment| owned.contains(&payment.account_id))
                .cloned()
                .collect()
        });

        payments.sort_by(|a, b| (b.at, b.id).cmp(&(a.at, a.id)));

        Ok(payments)
    }

    /// Transfers with any of the owner's accounts on either side, newest first
    pub fn transfers(&self, owner: OwnerId) -> LedgerResult<Vec<Transfer>> {
        let owned = self.owned_account_ids(owner)?;

        let mut transfers: Vec<Transfer> = self.store.read_records(|records| {
            records
                .transfers()
                .iter()
                .filter(|t| owned.contains(&t.source) || owned.contains(&t.destination))
                .cloned()
                .collect()
        });

        transfers.sort_by(|a, b| (b.at, b.id).cmp(&(a.at, a.id)));

        Ok(transfers)
    }

    fn window_start(&self, to: DateTime<Utc>) -> LedgerResult<DateTime<Utc>> {
        Duration::try_days(self.statement_window_days)
            .and_then(|window| to.checked_sub_signed(window))
            .ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Statement period of {} days ending {to} is out of range",
                    self.statement_window_days
                ))
            })
    }

    fn owned_account(&self, owner: OwnerId, iban: &Iban) -> LedgerResult<Account> {
        let account = self.store.get_by_iban(iban)?;
        account.ensure_owned_by(owner)?;

        Ok(account)
    }

    fn owned_account_ids(&self, owner: OwnerId) -> LedgerResult<HashSet<AccountId>> {
        let ids = self
            .store
            .accounts_of(owner)?
            .into_iter()
            .map(|account| account.id)
            .collect();

        Ok(ids)
    }

    fn owner_movements(
        &self,
        owner: OwnerId,
        keep: impl Fn(&Movement) -> bool,
    ) -> LedgerResult<Vec<Movement>> {
        let owned = self.owned_account_ids(owner)?;

        let movements = self.store.read_records(|records| {
            records
                .movements()
                .iter()
                .filter(|movement| owned.contains(&movement.account_id) && keep(movement))
                .cloned()
                .collect()
        });

        Ok(newest_first(movements))
    }
}

fn newest_first(mut movements: Vec<Movement>) -> Vec<Movement> {
    movements.sort_by(|a, b| (b.at, b.id).cmp(&(a.at, a.id)));
    movements
}

fn ensure_ordered(from: DateTime<Utc>, to: DateTime<Utc>) -> LedgerResult {
    if from > to {
        return Err(LedgerError::Validation(format!(
            "Period start {from} is after its end {to}"
        )));
    }

    Ok(())
}
