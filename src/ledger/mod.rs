pub mod store;
pub mod transaction;

pub use store::{LedgerEvent, LedgerStore};
pub use transaction::{parse_amount, Transaction, TransactionDraft, TransactionKind};
