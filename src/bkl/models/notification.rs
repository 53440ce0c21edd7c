use crate::ids::{NotificationId, OwnerId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Human-readable event addressed to an owner. Only `read` ever changes, and only to `true`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub owner: OwnerId,
    pub title: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub owner: OwnerId,
    pub title: String,
    pub message: String,
}

impl NewNotification {
    pub fn into_notification(self, id: NotificationId, sent_at: DateTime<Utc>) -> Notification {
        Notification {
            id,
            owner: self.owner,
            title: self.title,
            message: self.message,
            sent_at,
            read: false,
        }
    }
}
