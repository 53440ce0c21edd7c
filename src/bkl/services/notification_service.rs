use crate::ids::{NotificationId, OwnerId};
use crate::models::Notification;
use crate::store::Store;
use crate::LedgerResult;

use std::sync::Arc;

pub struct NotificationService {
    store: Arc<Store>,
}

impl NotificationService {
    pub fn new(store: Arc<Store>) -> Self {
        return Self { store };
    }

    /// Every notification sent to the owner, newest first
    pub fn notifications(&self, owner: OwnerId) -> Vec<Notification> {
        self.collect(owner, |_| true)
    }

    pub fn unread(&self, owner: OwnerId) -> Vec<Notification> {
        self.collect(owner, |notification| !notification.read)
    }

    /// Marks one of the owner's notifications as read. Marking it again changes nothing.
    pub fn mark_read(&self, owner: OwnerId, id: NotificationId) -> LedgerResult<Notification> {
        let notification = self.store.mark_notification_read(owner, id)?;
        log::debug!("Notification {id} read by owner {owner}");

        Ok(notification)
    }

    fn collect(&self, owner: OwnerId, keep: impl Fn(&Notification) -> bool) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = self.store.read_records(|records| {
            records
                .notifications()
                .iter()
                .filter(|notification| notification.owner == owner && keep(notification))
                .cloned()
                .collect()
        });

        notifications.sort_by(|a, b| (b.sent_at, b.id).cmp(&(a.sent_at, a.id)));

        notifications
    }
}
