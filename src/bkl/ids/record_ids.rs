use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                return write!(f, "{}", self.0);
            }
        }
    };
}

record_id!(MovementId);
record_id!(TransferId);
record_id!(PaymentId);
record_id!(
    /// Identifier of an owner-facing notification
    NotificationId
);
record_id!(AuditId);
