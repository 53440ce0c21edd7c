use crate::command::{
    Command, CommandKind, DepositRequest, Outcome, PaymentRequest, TransferRequest,
};
use crate::error::LedgerError;
use crate::events::{
    AccountOpenedEvent, DepositEvent, LedgerEvent, PaymentEvent, StatusChange,
    StatusChangedEvent, TransferEvent,
};
use crate::ids::{AccountId, Iban, IbanAllocator, OwnerId};
use crate::models::{
    Account, AccountType, Movement, NewAccount, NewMovement, NewPayment, NewTransfer, Payment,
    Transfer,
};
use crate::notifications::notifications_for;
use crate::store::{Store, Transaction};
use crate::{LedgerConfig, LedgerResult, Money};

use std::sync::Arc;

const MAX_PAYEE_LEN: usize = 150;
const MAX_REFERENCE_LEN: usize = 50;
const MAX_DESCRIPTION_LEN: usize = 250;

/// Applies balance- and status-changing operations.
///
/// Every operation runs inside one store transaction holding every account it touches, so its
/// balance updates, movements, records and notifications are committed together or not at all.
pub struct LedgerService {
    store: Arc<Store>,
    allocator: IbanAllocator,
    config: LedgerConfig,
}

impl LedgerService {
    pub fn new(store: Arc<Store>, config: LedgerConfig) -> LedgerResult<Self> {
        let allocator = IbanAllocator::new(&config.iban_prefix)?;

        Ok(Self {
            store,
            allocator,
            config,
        })
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn execute(&self, command: Command) -> LedgerResult<Outcome> {
        log::debug!("Executing command: {command:?}");

        let owner = command.owner;

        let outcome = match command.kind {
            CommandKind::Open { account_type } => {
                Outcome::Opened(self.open_account(owner, account_type)?)
            }
            CommandKind::Deposit(request) => Outcome::Deposited(self.deposit(owner, &request)?),
            CommandKind::Pay(request) => Outcome::Paid(self.pay(owner, &request)?),
            CommandKind::Transfer(request) => {
                Outcome::Transferred(self.transfer(owner, &request)?)
            }
            CommandKind::Close { iban } => {
                Outcome::StatusChanged(self.close_account(owner, &iban)?)
            }
            CommandKind::Block { iban } => {
                Outcome::StatusChanged(self.block_account(owner, &iban)?)
            }
            CommandKind::Unblock { iban } => {
                Outcome::StatusChanged(self.unblock_account(owner, &iban)?)
            }
        };

        Ok(outcome)
    }

    /// Opens an Active, zero-balance account under a freshly allocated IBAN
    pub fn open_account(&self, owner: OwnerId, account_type: AccountType) -> LedgerResult<Account> {
        for attempt in 1..=self.config.iban_attempts {
            let iban = self.allocator.next_candidate();

            let result = self.store.transaction(&[], |tx| {
                let account = tx.open_account(NewAccount {
                    owner,
                    iban: iban.clone(),
                    account_type,
                });

                emit(
                    tx,
                    LedgerEvent::AccountOpened(AccountOpenedEvent {
                        account: account.clone(),
                    }),
                );

                Ok(account)
            });

            match result {
                Err(LedgerError::DuplicateIban(iban)) => {
                    log::warn!("IBAN {iban} is taken, trying the next one (attempt {attempt})");
                }
                Ok(account) => {
                    log::info!(
                        "Opened {} account {} for owner {owner}",
                        account.account_type,
                        account.iban
                    );
                    return Ok(account);
                }
                Err(e) => return Err(e),
            }
        }

        Err(LedgerError::Conflict(format!(
            "No free IBAN found after {} attempts",
            self.config.iban_attempts
        )))
    }

    pub fn deposit(&self, owner: OwnerId, request: &DepositRequest) -> LedgerResult<Movement> {
        validate_amount(request.amount)?;
        let description = validate_description(&request.description)?;
        let account_id = self.find_account_id(&request.iban)?;

        let movement = self.with_retry("deposit", || {
            self.store.transaction(&[account_id], |tx| {
                let account = tx.account_mut(account_id)?;
                account.ensure_owned_by(owner)?;
                account.credit(request.amount)?;
                let account = account.clone();

                let movement = tx.record_movement(NewMovement::credit(
                    account_id,
                    request.amount,
                    description.clone().unwrap_or_else(|| "Deposit".to_string()),
                ));

                emit(
                    tx,
                    LedgerEvent::Deposit(DepositEvent {
                        account,
                        movement: movement.clone(),
                    }),
                );

                Ok(movement)
            })
        })?;

        log::info!("Deposited {} into {}", request.amount, request.iban);

        Ok(movement)
    }

    /// Debits the owner's account in favour of an external payee
    pub fn pay(&self, owner: OwnerId, request: &PaymentRequest) -> LedgerResult<Payment> {
        validate_amount(request.amount)?;
        let payee = validate_text("payee", &request.payee, MAX_PAYEE_LEN)?;
        let reference = validate_text("reference", &request.reference, MAX_REFERENCE_LEN)?;
        let account_id = self.find_account_id(&request.iban)?;

        let payment = self.with_retry("payment", || {
            self.store.transaction(&[account_id], |tx| {
                let account = tx.account_mut(account_id)?;
                account.ensure_owned_by(owner)?;
                account.debit(request.amount)?;
                let account = account.clone();

                let movement = tx.record_movement(NewMovement::debit(
                    account_id,
                    request.amount,
                    format!("Payment to {payee} - Ref: {reference}"),
                ));

                let payment = tx.record_payment(NewPayment {
                    account_id,
                    payee: payee.to_string(),
                    reference: reference.to_string(),
                    amount: request.amount,
                });

                emit(
                    tx,
                    LedgerEvent::Payment(PaymentEvent {
                        account,
                        payment: payment.clone(),
                        movement,
                    }),
                );

                Ok(payment)
            })
        })?;

        log::info!(
            "Paid {} from {} to {payee} (ref {reference})",
            request.amount,
            request.iban
        );

        Ok(payment)
    }

    /// Moves money from one of the owner's accounts to any Active account
    pub fn transfer(&self, owner: OwnerId, request: &TransferRequest) -> LedgerResult<Transfer> {
        validate_amount(request.amount)?;
        let description = validate_description(&request.description)?;

        if request.source == request.destination {
            return Err(LedgerError::Validation(format!(
                "Source and destination must be different accounts: {}",
                request.source
            )));
        }

        let source_id = self.find_account_id(&request.source)?;
        let destination_id = self.find_account_id(&request.destination)?;

        let transfer = self.with_retry("transfer", || {
            self.store.transaction(&[source_id, destination_id], |tx| {
                let amount = request.amount;
                apply_transfer(tx, owner, (source_id, destination_id), amount, &description)
            })
        })?;

        log::info!(
            "Transferred {} from {} to {}",
            request.amount,
            request.source,
            request.destination
        );

        Ok(transfer)
    }

    /// Closes a zero-balance account for good
    pub fn close_account(&self, owner: OwnerId, iban: &Iban) -> LedgerResult<Account> {
        self.change_status(owner, iban, StatusChange::Closed)
    }

    pub fn block_account(&self, owner: OwnerId, iban: &Iban) -> LedgerResult<Account> {
        self.change_status(owner, iban, StatusChange::Blocked)
    }

    pub fn unblock_account(&self, owner: OwnerId, iban: &Iban) -> LedgerResult<Account> {
        self.change_status(owner, iban, StatusChange::Unblocked)
    }

    fn change_status(
        &self,
        owner: OwnerId,
        iban: &Iban,
        change: StatusChange,
    ) -> LedgerResult<Account> {
        let account_id = self.find_account_id(iban)?;

        let account = self.with_retry("status change", || {
            self.store.transaction(&[account_id], |tx| {
                let now = tx.now();
                let account = tx.account_mut(account_id)?;
                account.ensure_owned_by(owner)?;

                match change {
                    StatusChange::Closed => account.close(now)?,
                    StatusChange::Blocked => account.block()?,
                    StatusChange::Unblocked => account.unblock()?,
                }

                let account = account.clone();

                emit(
                    tx,
                    LedgerEvent::StatusChanged(StatusChangedEvent {
                        account: account.clone(),
                        change,
                    }),
                );

                Ok(account)
            })
        })?;

        log::info!("Account {iban} is now {}", account.status);

        Ok(account)
    }

    fn find_account_id(&self, iban: &Iban) -> LedgerResult<AccountId> {
        self.store
            .find_id(iban)
            .ok_or_else(|| LedgerError::NotFound(format!("Account not found: {iban}")))
    }

    /// Re-runs `attempt` while it fails with a retryable error, up to the configured attempts
    fn with_retry<T>(
        &self,
        operation: &str,
        mut attempt: impl FnMut() -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let mut tries = 1;

        loop {
            match attempt() {
                Err(e) if e.is_retryable() && tries < self.config.max_attempts => {
                    log::debug!("{operation} attempt {tries} failed, retrying: {e}");
                    tries += 1;
                }
                result => return result,
            }
        }
    }
}

fn apply_transfer(
    tx: &mut Transaction<'_>,
    owner: OwnerId,
    (source_id, destination_id): (AccountId, AccountId),
    amount: Money,
    description: &Option<String>,
) -> LedgerResult<Transfer> {
    let source = tx.account(source_id)?;
    source.ensure_owned_by(owner)?;
    source.ensure_active()?;

    // any owner's account may receive
    tx.account(destination_id)?.ensure_active()?;

    tx.account_mut(source_id)?.debit(amount)?;
    tx.account_mut(destination_id)?.credit(amount)?;

    let source = tx.account(source_id)?.clone();
    let destination = tx.account(destination_id)?.clone();

    let debit = tx.record_movement(NewMovement::debit(
        source_id,
        amount,
        description
            .clone()
            .unwrap_or_else(|| format!("Transfer to {}", destination.iban)),
    ));

    let credit = tx.record_movement(NewMovement::credit(
        destination_id,
        amount,
        description
            .clone()
            .unwrap_or_else(|| format!("Transfer from {}", source.iban)),
    ));

    let transfer = tx.record_transfer(NewTransfer {
        source: source_id,
        destination: destination_id,
        amount,
        description: description.clone(),
    });

    emit(
        tx,
        LedgerEvent::Transfer(TransferEvent {
            source,
            destination,
            transfer: transfer.clone(),
            debit,
            credit,
        }),
    );

    Ok(transfer)
}

fn emit(tx: &mut Transaction<'_>, event: LedgerEvent) {
    for notification in notifications_for(&event) {
        tx.notify(notification);
    }
}

fn validate_amount(amount: Money) -> LedgerResult {
    if amount < Money::MIN_AMOUNT {
        return Err(LedgerError::Validation(format!(
            "Amount must be at least {}, got {amount}",
            Money::MIN_AMOUNT
        )));
    }

    Ok(())
}

fn validate_text<'a>(field: &str, value: &'a str, max_len: usize) -> LedgerResult<&'a str> {
    let value = value.trim();

    if value.is_empty() {
        return Err(LedgerError::Validation(format!("{field} is required")));
    }

    if value.chars().count() > max_len {
        return Err(LedgerError::Validation(format!(
            "{field} is longer than {max_len} characters"
        )));
    }

    Ok(value)
}

fn validate_description(description: &Option<String>) -> LedgerResult<Option<String>> {
    match description.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => Ok(Some(
            validate_text("description", text, MAX_DESCRIPTION_LEN)?.to_string(),
        )),
    }
}
