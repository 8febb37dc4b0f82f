use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::LedgerError,
    ledger::Transaction,
    utils::{app_data_dir, ensure_dir, write_atomic},
};

use super::StorageBackend;

const KEY_PREFIX: &str = "transactions_";
const LEDGER_EXTENSION: &str = "json";

/// File-per-user JSON persistence under the application data directory.
///
/// Each user's ledger lives at `transactions_<userId>.json`, the legacy
/// storage key shape rendered as a file name.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self, LedgerError> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self, LedgerError> {
        Self::new(None)
    }

    pub fn ledger_path(&self, user_key: &str) -> PathBuf {
        self.root.join(format!(
            "{}{}.{}",
            KEY_PREFIX,
            canonical_user_key(user_key),
            LEDGER_EXTENSION
        ))
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self, user_key: &str) -> Vec<Transaction> {
        let path = self.ledger_path(user_key);
        if !path.exists() {
            return Vec::new();
        }
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(user = user_key, %err, "ledger file unreadable, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&data) {
            Ok(transactions) => transactions,
            Err(err) => {
                tracing::warn!(user = user_key, %err, "ledger file corrupt, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, user_key: &str, transactions: &[Transaction]) -> Result<(), LedgerError> {
        let path = self.ledger_path(user_key);
        let json = serde_json::to_string_pretty(transactions)?;
        write_atomic(&path, &json)?;
        Ok(())
    }
}

/// Maps a user identifier onto a filesystem-safe key segment.
fn canonical_user_key(user_key: &str) -> String {
    let sanitized: String = user_key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "anonymous".into()
    } else {
        sanitized
    }
}
