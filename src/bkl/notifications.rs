use crate::events::{
    AccountOpenedEvent, DepositEvent, LedgerEvent, PaymentEvent, StatusChange,
    StatusChangedEvent, TransferEvent,
};
use crate::models::NewNotification;

/// Derives the notifications owed to the owners affected by a committed operation.
///
/// Pure: persisting them is the caller's job, inside the same transaction as the operation.
pub fn notifications_for(event: &LedgerEvent) -> Vec<NewNotification> {
    match event {
        LedgerEvent::AccountOpened(event) => vec![account_opened(event)],
        LedgerEvent::Deposit(event) => vec![deposit(event)],
        LedgerEvent::Payment(event) => vec![payment(event)],
        LedgerEvent::Transfer(event) => transfer(event),
        LedgerEvent::StatusChanged(event) => vec![status_changed(event)],
    }
}

fn account_opened(event: &AccountOpenedEvent) -> NewNotification {
    let account = &event.account;

    NewNotification {
        owner: account.owner,
        title: "New Bank Account".to_string(),
        message: format!(
            "A new {} account was opened with IBAN {}",
            account.account_type, account.iban
        ),
    }
}

fn deposit(event: &DepositEvent) -> NewNotification {
    NewNotification {
        owner: event.account.owner,
        title: "Deposit Received".to_string(),
        message: format!(
            "Deposit of {} into account {}",
            event.movement.amount, event.account.iban
        ),
    }
}

fn payment(event: &PaymentEvent) -> NewNotification {
    let payment = &event.payment;

    NewNotification {
        owner: event.account.owner,
        title: "Payment Completed".to_string(),
        message: format!(
            "Payment of {} to {} (Ref: {})",
            payment.amount, payment.payee, payment.reference
        ),
    }
}

/// One notification per side, each worded from that owner's perspective
fn transfer(event: &TransferEvent) -> Vec<NewNotification> {
    let amount = event.transfer.amount;

    vec![
        NewNotification {
            owner: event.source.owner,
            title: "Transfer Sent".to_string(),
            message: format!(
                "You transferred {} to account {}",
                amount, event.destination.iban
            ),
        },
        NewNotification {
            owner: event.destination.owner,
            title: "Transfer Received".to_string(),
            message: format!("You received {} from account {}", amount, event.source.iban),
        },
    ]
}

fn status_changed(event: &StatusChangedEvent) -> NewNotification {
    let iban = &event.account.iban;

    let (title, message) = match event.change {
        StatusChange::Closed => (
            "Account Closed",
            format!("The account with IBAN {iban} was closed successfully."),
        ),
        StatusChange::Blocked => (
            "Account Blocked",
            format!("The account with IBAN {iban} was blocked."),
        ),
        StatusChange::Unblocked => (
            "Account Unblocked",
            format!("The account with IBAN {iban} is active again."),
        ),
    };

    NewNotification {
        owner: event.account.owner,
        title: title.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ids::{AccountId, Iban, MovementId, OwnerId, PaymentId, TransferId};
    use crate::models::{
        Account, AccountType, Movement, NewAccount, NewMovement, Payment, Transfer,
    };
    use crate::Money;

    use chrono::Utc;

    const SOME_OWNER: OwnerId = OwnerId(1);
    const OTHER_OWNER: OwnerId = OwnerId(2);

    fn build_account(id: u64, owner: OwnerId) -> Account {
        NewAccount {
            owner,
            iban: Iban::parse(&format!("PT50{id:019}")).unwrap(),
            account_type: AccountType::Savings,
        }
        .into_account(AccountId(id), Utc::now())
    }

    fn build_movement(account: &Account, new: fn(AccountId, Money, String) -> NewMovement) -> Movement {
        new(account.id, Money(4000), String::new()).into_movement(MovementId(1), Utc::now())
    }

    #[test]
    fn account_opened() {
        let account = build_account(1, SOME_OWNER);

        let notifications = notifications_for(&LedgerEvent::AccountOpened(AccountOpenedEvent {
            account,
        }));

        assert_eq!(
            notifications,
            vec![NewNotification {
                owner: SOME_OWNER,
                title: "New Bank Account".to_string(),
                message: "A new savings account was opened with IBAN PT500000000000000000001"
                    .to_string(),
            }]
        );
    }

    #[test]
    fn payment() {
        let account = build_account(1, SOME_OWNER);
        let movement = build_movement(&account, NewMovement::debit);
        let payment = Payment {
            id: PaymentId(3),
            account_id: account.id,
            payee: "ACME".to_string(),
            reference: "REF1".to_string(),
            amount: Money(4000),
            at: Utc::now(),
        };

        let notifications = notifications_for(&LedgerEvent::Payment(PaymentEvent {
            account,
            payment,
            movement,
        }));

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].owner, SOME_OWNER);
        assert_eq!(notifications[0].title, "Payment Completed");
        assert_eq!(notifications[0].message, "Payment of 40.00 to ACME (Ref: REF1)");
    }

    #[test]
    fn transfer_notifies_both_owners() {
        let source = build_account(1, SOME_OWNER);
        let destination = build_account(2, OTHER_OWNER);
        let debit = build_movement(&source, NewMovement::debit);
        let credit = build_movement(&destination, NewMovement::credit);
        let transfer = Transfer {
            id: TransferId(1),
            source: source.id,
            destination: destination.id,
            amount: Money(4000),
            at: Utc::now(),
            description: None,
        };

        let notifications = notifications_for(&LedgerEvent::Transfer(TransferEvent {
            source,
            destination,
            transfer,
            debit,
            credit,
        }));

        assert_eq!(notifications.len(), 2);

        assert_eq!(notifications[0].owner, SOME_OWNER);
        assert_eq!(notifications[0].title, "Transfer Sent");
        assert_eq!(
            notifications[0].message,
            "You transferred 40.00 to account PT500000000000000000002"
        );

        assert_eq!(notifications[1].owner, OTHER_OWNER);
        assert_eq!(notifications[1].title, "Transfer Received");
        assert_eq!(
            notifications[1].message,
            "You received 40.00 from account PT500000000000000000001"
        );
    }

    #[test]
    fn status_changes() {
        for (change, title) in [
            (StatusChange::Closed, "Account Closed"),
            (StatusChange::Blocked, "Account Blocked"),
            (StatusChange::Unblocked, "Account Unblocked"),
        ] {
            let notifications =
                notifications_for(&LedgerEvent::StatusChanged(StatusChangedEvent {
                    account: build_account(1, OTHER_OWNER),
                    change,
                }));

            assert_eq!(notifications.len(), 1);
            assert_eq!(notifications[0].owner, OTHER_OWNER);
            assert_eq!(notifications[0].title, title);
        }
    }

    #[test]
    fn deposit() {
        let account = build_account(1, SOME_OWNER);
        let movement = build_movement(&account, NewMovement::credit);

        let notifications =
            notifications_for(&LedgerEvent::Deposit(DepositEvent { account, movement }));

        assert_eq!(notifications[0].title, "Deposit Received");
        assert_eq!(
            notifications[0].message,
            "Deposit of 40.00 into account PT500000000000000000001"
        );
    }
}
