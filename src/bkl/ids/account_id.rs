use std::fmt;

use serde::{Deserialize, Serialize};

/// Arena key of an account. Locks are always taken in ascending `AccountId` order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "AccountId({})", self.0);
    }
}
