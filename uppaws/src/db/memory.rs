//! In-memory key-value repository.
//!
//! Records are kept serialized, the same shape an external key-value store
//! would hold, so nothing handed out aliases stored state.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{errors::StoreResult, repository::TournamentRepository};
use crate::tournament::models::Tournament;

#[derive(Debug, Default)]
struct Records {
    by_id: HashMap<String, String>,
    /// Insertion order for `list`
    order: Vec<String>,
}

/// `TournamentRepository` backed by a `HashMap` of JSON strings
#[derive(Debug, Default)]
pub struct InMemoryTournamentRepository {
    records: RwLock<Records>,
}

impl InMemoryTournamentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.by_id.is_empty()
    }
}

#[async_trait]
impl TournamentRepository for InMemoryTournamentRepository {
    async fn get(&self, id: &str) -> StoreResult<Option<Tournament>> {
        let records = self.records.read().await;
        match records.by_id.get(id) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, tournament: &Tournament) -> StoreResult<()> {
        let json = serde_json::to_string(tournament)?;
        let mut records = self.records.write().await;
        if records.by_id.insert(tournament.id.clone(), json).is_none() {
            records.order.push(tournament.id.clone());
        }
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Tournament>> {
        let records = self.records.read().await;
        records
            .order
            .iter()
            .filter_map(|id| records.by_id.get(id))
            .map(|json| Ok(serde_json::from_str(json)?))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::models::{TournamentConfig, TournamentVariant};
    use chrono::Utc;

    fn tournament(id: &str) -> Tournament {
        Tournament::from_config(
            id.to_string(),
            TournamentConfig::round_robin("League", 4, Utc::now()),
            TournamentVariant::Standard,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let repo = InMemoryTournamentRepository::new();
        repo.put(&tournament("a")).await.unwrap();

        let loaded = repo.get("a").await.unwrap().unwrap();
        assert_eq!(loaded.id, "a");
        assert_eq!(loaded.name, "League");
        assert!(repo.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_and_keeps_order() {
        let repo = InMemoryTournamentRepository::new();
        repo.put(&tournament("first")).await.unwrap();
        repo.put(&tournament("second")).await.unwrap();

        let mut updated = tournament("first");
        updated.name = "Renamed".into();
        repo.put(&updated).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(repo.len().await, 2);
        assert_eq!(all[0].id, "first");
        assert_eq!(all[0].name, "Renamed");
        assert_eq!(all[1].id, "second");
    }

    #[tokio::test]
    async fn test_returned_records_are_copies() {
        let repo = InMemoryTournamentRepository::new();
        repo.put(&tournament("a")).await.unwrap();

        let mut copy = repo.get("a").await.unwrap().unwrap();
        copy.rules.push("no legendaries".into());

        assert!(repo.get("a").await.unwrap().unwrap().rules.is_empty());
    }
}
