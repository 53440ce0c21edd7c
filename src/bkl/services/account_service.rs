use crate::account_report::AccountReport;
use crate::ids::{Iban, OwnerId};
use crate::models::Account;
use crate::store::Store;
use crate::{LedgerResult, Money};

use std::sync::Arc;

/// Read-only views over accounts, always scoped to the requesting owner
pub struct AccountService {
    store: Arc<Store>,
}

impl AccountService {
    pub fn new(store: Arc<Store>) -> Self {
        return Self { store };
    }

    /// The owner's Active accounts, in creation order
    pub fn list_accounts(&self, owner: OwnerId) -> LedgerResult<Vec<Account>> {
        let accounts = self
            .store
            .accounts_of(owner)?
            .into_iter()
            .filter(Account::is_active)
            .collect();

        Ok(accounts)
    }

    /// Looks up one of the owner's accounts. Someone else's account is reported as not found.
    pub fn account(&self, owner: OwnerId, iban: &Iban) -> LedgerResult<Account> {
        let account = self.store.get_by_iban(iban)?;
        account.ensure_owned_by(owner)?;

        Ok(account)
    }

    pub fn balance(&self, owner: OwnerId, iban: &Iban) -> LedgerResult<Money> {
        Ok(self.account(owner, iban)?.balance)
    }

    /// One row per account in the store, whatever its owner or status
    pub fn build_report(&self) -> LedgerResult<Vec<AccountReport>> {
        let report = self
            .store
            .all_accounts()?
            .iter()
            .map(AccountReport::from)
            .collect();

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::LedgerError;
    use crate::models::{AccountStatus, AccountType, NewAccount};

    use std::time::Duration;

    const SOME_OWNER: OwnerId = OwnerId(7);
    const OTHER_OWNER: OwnerId = OwnerId(8);

    fn build_service() -> (Arc<Store>, AccountService) {
        let store = Arc::new(Store::new(Duration::from_millis(100)));
        let service = AccountService::new(store.clone());

        (store, service)
    }

    fn put_account(store: &Store, owner: OwnerId, iban: &str) -> Account {
        store
            .put(NewAccount {
                owner,
                iban: Iban::parse(iban).unwrap(),
                account_type: AccountType::Checking,
            })
            .unwrap()
    }

    fn set_status(store: &Store, account: &Account, status: AccountStatus) {
        store
            .transaction(&[account.id], |tx| {
                tx.account_mut(account.id)?.status = status;
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn list_accounts_only_shows_active_ones() {
        let (store, service) = build_service();
        let first = put_account(&store, SOME_OWNER, "PT500000000000000000001");
        let blocked = put_account(&store, SOME_OWNER, "PT500000000000000000002");
        let closed = put_account(&store, SOME_OWNER, "PT500000000000000000003");
        put_account(&store, OTHER_OWNER, "PT500000000000000000004");

        set_status(&store, &blocked, AccountStatus::Blocked);
        set_status(&store, &closed, AccountStatus::Closed);

        let accounts = service.list_accounts(SOME_OWNER).unwrap();

        assert_eq!(accounts, vec![first]);
        assert!(service.list_accounts(OwnerId(99)).unwrap().is_empty());
    }

    #[test]
    fn account_is_scoped_to_owner() {
        let (store, service) = build_service();
        let account = put_account(&store, SOME_OWNER, "PT500000000000000000001");

        assert_eq!(service.account(SOME_OWNER, &account.iban).unwrap(), account);
        assert_eq!(service.balance(SOME_OWNER, &account.iban).unwrap(), Money::ZERO);

        let err = service.account(OTHER_OWNER, &account.iban).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));

        let err = service
            .balance(SOME_OWNER, &Iban::parse("PT509999999999999999999").unwrap())
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[test]
    fn report_covers_every_account() {
        let (store, service) = build_service();
        put_account(&store, SOME_OWNER, "PT500000000000000000001");
        let closed = put_account(&store, OTHER_OWNER, "PT500000000000000000002");
        set_status(&store, &closed, AccountStatus::Closed);

        let report = service.build_report().unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].iban, "PT500000000000000000001");
        assert_eq!(report[0].status, "Active");
        assert_eq!(report[1].owner, 8);
        assert_eq!(report[1].status, "Closed");
        assert_eq!(report[1].balance, "0.00");
    }
}
