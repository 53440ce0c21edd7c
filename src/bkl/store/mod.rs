mod account_store;
mod records;
mod sequences;
mod transaction;

pub use account_store::Store;
pub use records::Records;
pub use transaction::Transaction;
