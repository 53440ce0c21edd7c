mod account_id;
mod iban;
mod owner_id;
mod record_ids;

pub use account_id::AccountId;
pub use iban::{Iban, IbanAllocator};
pub use owner_id::OwnerId;
pub use record_ids::{AuditId, MovementId, NotificationId, PaymentId, TransferId};
