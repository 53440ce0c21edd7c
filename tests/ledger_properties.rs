use bkl::command::{DepositRequest, PaymentRequest, TransferRequest};
use bkl::ids::{Iban, OwnerId};
use bkl::models::{Account, AccountType};
use bkl::{build_bank, Bank, LedgerConfig, LedgerError, Money};

use std::thread;

use proptest::prelude::*;

const SOME_OWNER: OwnerId = OwnerId(1);
const OTHER_OWNER: OwnerId = OwnerId(2);

#[derive(Debug, Clone)]
enum Op {
    Deposit(usize, i64),
    Pay(usize, i64),
    Transfer(usize, usize, i64),
    Close(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 1..50_000i64).prop_map(|(idx, cents)| Op::Deposit(idx, cents)),
        (0..3usize, 1..50_000i64).prop_map(|(idx, cents)| Op::Pay(idx, cents)),
        (0..3usize, 0..3usize, 1..50_000i64)
            .prop_map(|(from, to, cents)| Op::Transfer(from, to, cents)),
        (0..3usize).prop_map(Op::Close),
    ]
}

fn build_accounts(bank: &Bank) -> Vec<Account> {
    vec![
        bank.ledger.open_account(SOME_OWNER, AccountType::Checking).unwrap(),
        bank.ledger.open_account(SOME_OWNER, AccountType::Savings).unwrap(),
        bank.ledger.open_account(OTHER_OWNER, AccountType::Other).unwrap(),
    ]
}

fn deposit(bank: &Bank, account: &Account, cents: i64) -> Result<(), LedgerError> {
    bank.ledger
        .deposit(
            account.owner,
            &DepositRequest {
                iban: account.iban.clone(),
                amount: Money(cents),
                description: None,
            },
        )
        .map(|_| ())
}

fn pay(bank: &Bank, account: &Account, cents: i64) -> Result<(), LedgerError> {
    bank.ledger
        .pay(
            account.owner,
            &PaymentRequest {
                iban: account.iban.clone(),
                payee: "ACME".to_string(),
                reference: "REF".to_string(),
                amount: Money(cents),
            },
        )
        .map(|_| ())
}

fn transfer(bank: &Bank, source: &Account, destination: &Iban, cents: i64) -> Result<(), LedgerError> {
    bank.ledger
        .transfer(
            source.owner,
            &TransferRequest {
                source: source.iban.clone(),
                destination: destination.clone(),
                amount: Money(cents),
                description: None,
            },
        )
        .map(|_| ())
}

proptest! {
    #[test]
    fn balances_match_the_ledger(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let bank = build_bank(LedgerConfig::default()).unwrap();
        let accounts = build_accounts(&bank);

        let mut external = 0i64;

        for op in ops {
            match op {
                Op::Deposit(idx, cents) => {
                    if deposit(&bank, &accounts[idx], cents).is_ok() {
                        external += cents;
                    }
                }
                Op::Pay(idx, cents) => {
                    if pay(&bank, &accounts[idx], cents).is_ok() {
                        external -= cents;
                    }
                }
                Op::Transfer(from, to, cents) => {
                    let result = transfer(&bank, &accounts[from], &accounts[to].iban, cents);
                    if from == to {
                        prop_assert!(matches!(result, Err(LedgerError::Validation(_))));
                    }
                }
                Op::Close(idx) => {
                    let account = &accounts[idx];
                    let _ = bank.ledger.close_account(account.owner, &account.iban);
                }
            }
        }

        let store = bank.ledger.store();
        let mut total = 0i64;

        for account in &accounts {
            let current = store.get(account.id).unwrap();
            prop_assert!(!current.balance.is_negative());

            let replayed = store
                .read_records(|records| records.movements().balance_of(account.id))
                .unwrap();
            prop_assert_eq!(replayed, current.balance);

            total += current.balance.0;
        }

        prop_assert_eq!(total, external);

        // every transfer is one debit plus one credit of the same amount
        let (transfers, movements, payments) = store.read_records(|records| {
            (records.transfers().len(), records.movements().len(), records.payments().len())
        });
        let deposits = store.read_records(|records| {
            records.movements().iter().filter(|m| m.description == "Deposit").count()
        });
        prop_assert_eq!(movements, deposits + payments + 2 * transfers);
    }
}

#[test]
fn concurrent_debits_never_overdraw() {
    const THREADS: i64 = 8;
    const AMOUNT: i64 = 1000;

    let bank = build_bank(LedgerConfig::default()).unwrap();
    let account = bank
        .ledger
        .open_account(SOME_OWNER, AccountType::Checking)
        .unwrap();

    deposit(&bank, &account, THREADS * AMOUNT - 1).unwrap();

    let results: Vec<Result<(), LedgerError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| scope.spawn(|| pay(&bank, &account, AMOUNT)))
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let succeeded = results.iter().filter(|r| r.is_ok()).count() as i64;
    let overdrawn = results
        .iter()
        .filter(|r| matches!(r, Err(LedgerError::InsufficientFunds { .. })))
        .count() as i64;

    assert_eq!(succeeded, THREADS - 1);
    assert_eq!(overdrawn, 1);

    let balance = bank
        .accounts
        .balance(SOME_OWNER, &account.iban)
        .unwrap();
    assert_eq!(balance, Money(AMOUNT - 1));
}

#[test]
fn opposing_transfers_conserve_money() {
    const ROUNDS: usize = 200;

    let bank = build_bank(LedgerConfig::default()).unwrap();
    let first = bank
        .ledger
        .open_account(SOME_OWNER, AccountType::Checking)
        .unwrap();
    let second = bank
        .ledger
        .open_account(OTHER_OWNER, AccountType::Checking)
        .unwrap();

    deposit(&bank, &first, 10_000).unwrap();
    deposit(&bank, &second, 10_000).unwrap();

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..ROUNDS {
                let _ = transfer(&bank, &first, &second.iban, 7);
            }
        });
        scope.spawn(|| {
            for _ in 0..ROUNDS {
                let _ = transfer(&bank, &second, &first.iban, 11);
            }
        });
    });

    let first_balance = bank.accounts.balance(SOME_OWNER, &first.iban).unwrap();
    let second_balance = bank.accounts.balance(OTHER_OWNER, &second.iban).unwrap();

    assert_eq!(first_balance.0 + second_balance.0, 20_000);
    assert!(!first_balance.is_negative());
    assert!(!second_balance.is_negative());
}
