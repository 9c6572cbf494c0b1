use thiserror::Error;

use crate::money::MoneyError;

/// Errors of the account domain and its orchestration layers.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Member does not exist")]
    NotExistMember,

    #[error("Caller is not the owning member of the account")]
    InvalidMember,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Source and destination accounts are the same")]
    SameAccountTransfer,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Account is busy, lock not acquired within the wait bound")]
    LockTimeout,

    /// Balance row changed underneath a version-guarded save. Retried by
    /// the facade; only surfaced when retries are exhausted.
    #[error("Account version conflict")]
    VersionConflict,

    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),
}

impl From<MoneyError> for AccountError {
    fn from(e: MoneyError) -> Self {
        match e {
            MoneyError::InsufficientFunds => AccountError::InsufficientFunds,
            _ => AccountError::InvalidAmount,
        }
    }
}
