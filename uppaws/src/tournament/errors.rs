//! Tournament error types.

use super::models::{TournamentId, TournamentStatus, TrainerId};
use crate::db::StoreError;
use thiserror::Error;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),

    #[error("Match not found: {0}")]
    MatchNotFound(String),

    #[error("Tournament is full")]
    TournamentFull,

    #[error("Registration closed")]
    RegistrationClosed,

    #[error("Trainer already registered: {0}")]
    AlreadyRegistered(TrainerId),

    #[error("Tournament not in correct state: expected {expected}, got {actual}")]
    InvalidState {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },

    #[error("Tournament cannot be cancelled once {0}")]
    NotCancellable(TournamentStatus),

    #[error("Insufficient participants: need {needed}, have {current}")]
    InsufficientParticipants { needed: usize, current: usize },

    #[error("Match already completed: {0}")]
    MatchAlreadyCompleted(String),

    #[error("Winner {winner} does not play in match {match_id}")]
    InvalidWinner { match_id: String, winner: TrainerId },

    #[error("Invalid tournament configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl TournamentError {
    /// Whether this error is an expected business-rule rejection rather than
    /// an infrastructure failure
    pub fn is_rule_violation(&self) -> bool {
        !matches!(self, TournamentError::Storage(_))
    }

    /// Get a client-safe error message
    ///
    /// Storage errors are sanitized so backend details are not exposed.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Storage(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

pub type TournamentResult<T> = Result<T, TournamentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_are_sanitized() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = TournamentError::from(StoreError::from(json_err));
        assert_eq!(err.client_message(), "Internal server error");
        assert!(!err.is_rule_violation());
    }

    #[test]
    fn test_rule_violation_message() {
        let err = TournamentError::InvalidState {
            expected: TournamentStatus::Registration,
            actual: TournamentStatus::InProgress,
        };
        assert!(err.is_rule_violation());
        assert_eq!(
            err.client_message(),
            "Tournament not in correct state: expected registration, got in_progress"
        );

        let err = TournamentError::NotCancellable(TournamentStatus::Completed);
        assert!(err.is_rule_violation());
        assert_eq!(
            err.client_message(),
            "Tournament cannot be cancelled once completed"
        );
    }
}
