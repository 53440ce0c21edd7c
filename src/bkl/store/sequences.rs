use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier sequences, one per record kind.
///
/// Like database sequences, a value handed to a transaction that later rolls back is never
/// reused, so identifiers may have gaps.
#[derive(Debug, Default)]
pub(crate) struct Sequences {
    pub accounts: Sequence,
    pub movements: Sequence,
    pub transfers: Sequence,
    pub payments: Sequence,
    pub notifications: Sequence,
    pub audit: Sequence,
}

#[derive(Debug, Default)]
pub(crate) struct Sequence(AtomicU64);

impl Sequence {
    /// Next value, starting at 1
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}
