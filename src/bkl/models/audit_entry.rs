use crate::ids::{AuditId, OwnerId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a sensitive, non-monetary operation such as a login or a profile change
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: AuditId,
    /// Absent when the actor could not be identified, e.g. a login with an unknown email
    pub owner: Option<OwnerId>,
    pub at: DateTime<Utc>,
    pub source_ip: Option<String>,
    pub success: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub owner: Option<OwnerId>,
    pub source_ip: Option<String>,
    pub success: bool,
    pub description: String,
}

impl NewAuditEntry {
    pub fn into_entry(self, id: AuditId, at: DateTime<Utc>) -> AuditEntry {
        AuditEntry {
            id,
            owner: self.owner,
            at,
            source_ip: self.source_ip,
            success: self.success,
            description: self.description,
        }
    }
}
