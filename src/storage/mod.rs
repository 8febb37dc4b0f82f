pub mod json_backend;

pub use json_backend::JsonStorage;

use crate::{errors::LedgerError, ledger::Transaction};

/// Durable key-value persistence for one user's transaction list.
///
/// The whole list is overwritten on every save; there are no partial updates
/// and no schema migration.
pub trait StorageBackend {
    /// Returns the stored list for `user_key`. Missing or unreadable data is
    /// recovered silently as an empty ledger, never surfaced as an error.
    fn load(&self, user_key: &str) -> Vec<Transaction>;

    /// Overwrites the entire stored value for `user_key`.
    fn save(&self, user_key: &str, transactions: &[Transaction]) -> Result<(), LedgerError>;
}
