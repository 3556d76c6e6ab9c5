//! Economy data models.

use crate::tournament::models::{TournamentId, TrainerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trainer account as seen by the economy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub trainer_id: TrainerId,
    /// Paw coin balance
    pub balance: i64,
    /// Owned item ids, in grant order
    pub inventory: Vec<String>,
    /// Earned titles
    pub titles: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(trainer_id: TrainerId, balance: i64) -> Self {
        Self {
            trainer_id,
            balance,
            inventory: Vec::new(),
            titles: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

/// Ledger entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    TournamentPrize,
    AdminAdjust,
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryType::TournamentPrize => write!(f, "tournament_prize"),
            EntryType::AdminAdjust => write!(f, "admin_adjust"),
        }
    }
}

/// Ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: u64,
    pub trainer_id: TrainerId,
    pub tournament_id: Option<TournamentId>,
    pub amount: i64,
    pub balance_after: i64,
    pub items: Vec<String>,
    pub entry_type: EntryType,
    pub idempotency_key: String,
    pub created_at: DateTime<Utc>,
}
