use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Description must not be empty")]
    EmptyDescription,
    #[error("Amount must be a positive number, got `{0}`")]
    InvalidAmount(String),
}
