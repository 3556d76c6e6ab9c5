//! Economy error types.

use thiserror::Error;

/// Economy errors
#[derive(Debug, Error)]
pub enum EconomyError {
    /// Duplicate grant (idempotency key already used)
    #[error("Duplicate grant: {0}")]
    DuplicateGrant(String),

    /// Invalid amount (must not be negative)
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Account not found
    #[error("Account not found for trainer {0}")]
    AccountNotFound(String),

    /// Downstream economy service rejected the grant
    #[error("Grant rejected: {0}")]
    Rejected(String),
}

impl EconomyError {
    /// Get a client-safe error message that doesn't leak trainer ids
    pub fn client_message(&self) -> String {
        match self {
            EconomyError::AccountNotFound(_) => "Account not found".to_string(),
            EconomyError::Rejected(_) => "Reward could not be delivered".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for economy operations
pub type EconomyResult<T> = Result<T, EconomyError>;
