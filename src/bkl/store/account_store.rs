use super::sequences::Sequences;
use super::{Records, Transaction};

use crate::error::LedgerError;
use crate::ids::{AccountId, AuditId, Iban, NotificationId, OwnerId};
use crate::models::{Account, AuditEntry, NewAccount, NewAuditEntry, Notification};
use crate::LedgerResult;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::{Mutex, MutexGuard, RwLock};

type AccountCell = Arc<Mutex<Account>>;

#[derive(Debug, Default)]
struct Index {
    by_iban: HashMap<Iban, AccountId>,
    by_owner: HashMap<OwnerId, Vec<AccountId>>,
}

/// In-memory account store: accounts and records live in arenas addressed by identifier.
///
/// Lock order is: account cells (ascending id), then `index`, then `accounts`, then `records`.
/// Nothing waits on an account cell while holding one of the `RwLock`s.
#[derive(Debug)]
pub struct Store {
    accounts: RwLock<HashMap<AccountId, AccountCell>>,
    index: RwLock<Index>,
    records: RwLock<Records>,
    sequences: Sequences,
    lock_timeout: Duration,
}

impl Store {
    pub fn new(lock_timeout: Duration) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            index: RwLock::new(Index::default()),
            records: RwLock::new(Records::default()),
            sequences: Sequences::default(),
            lock_timeout,
        }
    }

    pub fn get(&self, id: AccountId) -> LedgerResult<Account> {
        let cell = self.cell(id)?;

        let account = cell
            .try_lock_for(self.lock_timeout)
            .ok_or_else(|| conflict(id))?
            .clone();

        Ok(account)
    }

    pub fn find_id(&self, iban: &Iban) -> Option<AccountId> {
        self.index.read().by_iban.get(iban).copied()
    }

    pub fn get_by_iban(&self, iban: &Iban) -> LedgerResult<Account> {
        let id = self
            .find_id(iban)
            .ok_or_else(|| LedgerError::NotFound(format!("Account not found: {iban}")))?;

        self.get(id)
    }

    /// Accounts held by `owner`, in creation order
    pub fn accounts_of(&self, owner: OwnerId) -> LedgerResult<Vec<Account>> {
        let ids = self
            .index
            .read()
            .by_owner
            .get(&owner)
            .cloned()
            .unwrap_or_default();

        ids.into_iter().map(|id| self.get(id)).collect()
    }

    pub fn all_accounts(&self) -> LedgerResult<Vec<Account>> {
        let mut ids: Vec<AccountId> = self.accounts.read().keys().copied().collect();
        ids.sort();

        ids.into_iter().map(|id| self.get(id)).collect()
    }

    /// Registers a new account, enforcing IBAN uniqueness
    pub fn put(&self, new: NewAccount) -> LedgerResult<Account> {
        self.transaction(&[], |tx| Ok(tx.open_account(new)))
    }

    /// Runs `work` with exclusive access to the given accounts and commits its staged writes
    /// as one unit.
    ///
    /// Accounts are locked in ascending id order; waiting longer than the lock timeout on any of
    /// them fails with [`LedgerError::Conflict`]. If `work` fails, nothing it staged is applied.
    pub fn transaction<T, F>(&self, ids: &[AccountId], work: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut Transaction<'_>) -> LedgerResult<T>,
    {
        let mut ids = ids.to_vec();
        ids.sort();
        ids.dedup();

        let cells = ids
            .iter()
            .map(|id| self.cell(*id))
            .collect::<LedgerResult<Vec<AccountCell>>>()?;

        let mut guards = Vec::with_capacity(cells.len());
        for (id, cell) in ids.iter().zip(cells.iter()) {
            let guard = cell
                .try_lock_for(self.lock_timeout)
                .ok_or_else(|| conflict(*id))?;

            guards.push(guard);
        }

        log::debug!("Locked accounts {ids:?}");

        let accounts = guards.iter().map(|guard| (**guard).clone()).collect();
        let mut tx = Transaction::new(&self.sequences, accounts);

        let value = work(&mut tx)?;

        self.commit(tx, &mut guards)?;

        Ok(value)
    }

    /// Read-only access to committed records.
    ///
    /// `read` must not call back into the store.
    pub fn read_records<T>(&self, read: impl FnOnce(&Records) -> T) -> T {
        read(&self.records.read())
    }

    pub fn mark_notification_read(
        &self,
        owner: OwnerId,
        id: NotificationId,
    ) -> LedgerResult<Notification> {
        self.records.write().mark_read(owner, id)
    }

    pub fn append_audit(&self, new: NewAuditEntry) -> AuditEntry {
        let id = AuditId(self.sequences.audit.next());
        let entry = new.into_entry(id, Utc::now());

        self.records.write().audit.push(entry.clone());

        entry
    }

    fn cell(&self, id: AccountId) -> LedgerResult<AccountCell> {
        self.accounts
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("Account not found: {id}")))
    }

    /// Applies staged writes. Every check happens before the first write, so a failed commit
    /// leaves the store untouched.
    fn commit(&self, tx: Transaction<'_>, guards: &mut [MutexGuard<'_, Account>]) -> LedgerResult {
        let Transaction {
            accounts,
            opened,
            movements,
            transfers,
            payments,
            notifications,
            ..
        } = tx;

        let mut registry = if opened.is_empty() {
            None
        } else {
            Some((self.index.write(), self.accounts.write()))
        };

        if let Some((index, _)) = registry.as_ref() {
            for (i, account) in opened.iter().enumerate() {
                let duplicate_in_batch = opened[..i].iter().any(|other| other.iban == account.iban);

                if duplicate_in_batch || index.by_iban.contains_key(&account.iban) {
                    return Err(LedgerError::DuplicateIban(account.iban.clone()));
                }
            }
        }

        let mut records = self.records.write();

        if let Some((index, cells)) = registry.as_mut() {
            for account in opened {
                index.by_iban.insert(account.iban.clone(), account.id);
                index.by_owner.entry(account.owner).or_default().push(account.id);
                cells.insert(account.id, Arc::new(Mutex::new(account)));
            }
        }

        for movement in movements {
            records.movements.append(movement);
        }
        records.transfers.extend(transfers);
        records.payments.extend(payments);
        records.notifications.extend(notifications);

        for (guard, account) in guards.iter_mut().zip(accounts) {
            **guard = account;
        }

        Ok(())
    }
}

fn conflict(id: AccountId) -> LedgerError {
    LedgerError::Conflict(format!("Timed out waiting for exclusive access to {id}"))
}
