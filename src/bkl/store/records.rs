use crate::error::LedgerError;
use crate::ids::{NotificationId, OwnerId};
use crate::ledger::Ledger;
use crate::models::{AuditEntry, Notification, Payment, Transfer};
use crate::LedgerResult;

/// Every record produced by committed operations, in commit order
#[derive(Debug, Default)]
pub struct Records {
    pub(crate) movements: Ledger,
    pub(crate) transfers: Vec<Transfer>,
    pub(crate) payments: Vec<Payment>,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) audit: Vec<AuditEntry>,
}

impl Records {
    pub fn movements(&self) -> &Ledger {
        &self.movements
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn audit(&self) -> &[AuditEntry] {
        &self.audit
    }

    pub(crate) fn mark_read(
        &mut self,
        owner: OwnerId,
        id: NotificationId,
    ) -> LedgerResult<Notification> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.owner == owner)
            .ok_or_else(|| LedgerError::NotFound(format!("Notification not found: {id}")))?;

        notification.read = true;

        Ok(notification.clone())
    }
}
