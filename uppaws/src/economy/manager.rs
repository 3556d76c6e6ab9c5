//! Prize delivery seam and an in-memory ledger implementation.

use super::{
    errors::{EconomyError, EconomyResult},
    models::{Account, EntryType, LedgerEntry},
};
use crate::tournament::models::PrizeGrant;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// Receiver of tournament prizes.
///
/// The tournament engine only decides who gets what; implementations apply
/// the grant to account state.
#[async_trait]
pub trait PrizeDistributor: Send + Sync {
    /// Apply a prize grant
    ///
    /// # Errors
    ///
    /// * `EconomyError::DuplicateGrant` - Idempotency key already applied
    async fn grant_prize(&self, grant: &PrizeGrant) -> EconomyResult<()>;
}

#[derive(Debug, Default)]
struct LedgerState {
    accounts: HashMap<String, Account>,
    entries: Vec<LedgerEntry>,
    applied_keys: HashSet<String>,
}

/// In-memory economy with an append-only ledger
#[derive(Debug, Default)]
pub struct InMemoryEconomy {
    state: RwLock<LedgerState>,
    starting_balance: i64,
}

impl InMemoryEconomy {
    /// Create an economy where new accounts open with `starting_balance`
    pub fn new(starting_balance: i64) -> Self {
        Self {
            state: RwLock::new(LedgerState::default()),
            starting_balance,
        }
    }

    /// Get account for a trainer
    ///
    /// # Errors
    ///
    /// * `EconomyError::AccountNotFound` - Trainer never received anything
    pub async fn get_account(&self, trainer_id: &str) -> EconomyResult<Account> {
        self.state
            .read()
            .await
            .accounts
            .get(trainer_id)
            .cloned()
            .ok_or_else(|| EconomyError::AccountNotFound(trainer_id.to_string()))
    }

    /// Balance, or the starting balance for unknown trainers
    pub async fn balance(&self, trainer_id: &str) -> i64 {
        self.state
            .read()
            .await
            .accounts
            .get(trainer_id)
            .map_or(self.starting_balance, |a| a.balance)
    }

    /// Ledger entries for a trainer, newest first
    pub async fn get_entries(&self, trainer_id: &str, limit: usize) -> Vec<LedgerEntry> {
        self.state
            .read()
            .await
            .entries
            .iter()
            .rev()
            .filter(|e| e.trainer_id == trainer_id)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Every ledger entry in application order
    pub async fn all_entries(&self) -> Vec<LedgerEntry> {
        self.state.read().await.entries.clone()
    }

    /// Credit or debit coins outside of a tournament
    ///
    /// # Errors
    ///
    /// * `EconomyError::DuplicateGrant` - Idempotency key already applied
    pub async fn adjust_balance(
        &self,
        trainer_id: &str,
        amount: i64,
        idempotency_key: String,
    ) -> EconomyResult<i64> {
        let mut state = self.state.write().await;

        if state.applied_keys.contains(&idempotency_key) {
            return Err(EconomyError::DuplicateGrant(idempotency_key));
        }

        let starting_balance = self.starting_balance;
        let account = state
            .accounts
            .entry(trainer_id.to_string())
            .or_insert_with(|| Account::new(trainer_id.to_string(), starting_balance));
        account.balance += amount;
        account.updated_at = Utc::now();
        let balance_after = account.balance;

        let id = state.entries.len() as u64 + 1;
        state.entries.push(LedgerEntry {
            id,
            trainer_id: trainer_id.to_string(),
            tournament_id: None,
            amount,
            balance_after,
            items: Vec::new(),
            entry_type: EntryType::AdminAdjust,
            idempotency_key: idempotency_key.clone(),
            created_at: Utc::now(),
        });
        state.applied_keys.insert(idempotency_key);

        Ok(balance_after)
    }
}

#[async_trait]
impl PrizeDistributor for InMemoryEconomy {
    async fn grant_prize(&self, grant: &PrizeGrant) -> EconomyResult<()> {
        if grant.prize.currency < 0 {
            return Err(EconomyError::InvalidAmount(grant.prize.currency));
        }

        let mut state = self.state.write().await;

        if state.applied_keys.contains(&grant.idempotency_key) {
            return Err(EconomyError::DuplicateGrant(grant.idempotency_key.clone()));
        }

        let starting_balance = self.starting_balance;
        let account = state
            .accounts
            .entry(grant.trainer_id.clone())
            .or_insert_with(|| Account::new(grant.trainer_id.clone(), starting_balance));
        account.balance += grant.prize.currency;
        account.inventory.extend(grant.prize.items.iter().cloned());
        if let Some(title) = &grant.prize.title {
            account.titles.push(title.clone());
        }
        account.updated_at = Utc::now();
        let balance_after = account.balance;

        let id = state.entries.len() as u64 + 1;
        state.entries.push(LedgerEntry {
            id,
            trainer_id: grant.trainer_id.clone(),
            tournament_id: Some(grant.tournament_id.clone()),
            amount: grant.prize.currency,
            balance_after,
            items: grant.prize.items.clone(),
            entry_type: EntryType::TournamentPrize,
            idempotency_key: grant.idempotency_key.clone(),
            created_at: Utc::now(),
        });
        state.applied_keys.insert(grant.idempotency_key.clone());

        log::info!(
            "Granted rank {} prize of {} coins to {} for tournament {}",
            grant.rank,
            grant.prize.currency,
            grant.trainer_id,
            grant.tournament_id
        );

        Ok(())
    }
}
