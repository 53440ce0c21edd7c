use crate::ids::OwnerId;
use crate::models::{AuditEntry, NewAuditEntry};
use crate::store::Store;

use std::sync::Arc;

/// Append-only trail of sensitive, non-monetary operations such as logins and profile changes
pub struct AuditService {
    store: Arc<Store>,
}

impl AuditService {
    pub fn new(store: Arc<Store>) -> Self {
        return Self { store };
    }

    pub fn record(&self, new: NewAuditEntry) -> AuditEntry {
        let entry = self.store.append_audit(new);

        if entry.success {
            log::info!("Audit {}: {}", entry.id, entry.description);
        } else {
            log::warn!(
                "Audit {} failed from {}: {}",
                entry.id,
                entry.source_ip.as_deref().unwrap_or("unknown source"),
                entry.description
            );
        }

        entry
    }

    pub fn record_success(
        &self,
        owner: OwnerId,
        source_ip: Option<String>,
        description: impl Into<String>,
    ) -> AuditEntry {
        self.record(NewAuditEntry {
            owner: Some(owner),
            source_ip,
            success: true,
            description: description.into(),
        })
    }

    /// `owner` is absent when the actor could not be identified
    pub fn record_failure(
        &self,
        owner: Option<OwnerId>,
        source_ip: Option<String>,
        description: impl Into<String>,
    ) -> AuditEntry {
        self.record(NewAuditEntry {
            owner,
            source_ip,
            success: false,
            description: description.into(),
        })
    }

    /// The owner's entries, newest first
    pub fn entries_for(&self, owner: OwnerId) -> Vec<AuditEntry> {
        self.collect(|entry| entry.owner == Some(owner))
    }

    /// Every failed operation, newest first
    pub fn failures(&self) -> Vec<AuditEntry> {
        self.collect(|entry| !entry.success)
    }

    fn collect(&self, keep: impl Fn(&AuditEntry) -> bool) -> Vec<AuditEntry> {
        let mut entries: Vec<AuditEntry> = self.store.read_records(|records| {
            records.audit().iter().filter(|entry| keep(entry)).cloned().collect()
        });

        entries.sort_by(|a, b| (b.at, b.id).cmp(&(a.at, a.id)));

        entries
    }
}
