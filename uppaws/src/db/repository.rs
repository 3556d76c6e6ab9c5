//! Repository trait definitions for testability and dependency injection.
//!
//! Tournament records are stored as serialized documents keyed by id. The
//! engine only ever needs get/put/list, so any key-value store will do.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::errors::StoreResult;
use crate::tournament::models::Tournament;

/// Trait for tournament record storage
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Load a tournament by id
    async fn get(&self, id: &str) -> StoreResult<Option<Tournament>>;

    /// Insert or replace a tournament
    async fn put(&self, tournament: &Tournament) -> StoreResult<()>;

    /// Every stored tournament, oldest first
    async fn list(&self) -> StoreResult<Vec<Tournament>>;
}

/// PostgreSQL implementation of `TournamentRepository`
///
/// Records live in a single JSONB column of `tournament_records`.
pub struct PgTournamentRepository {
    pool: PgPool,
}

impl PgTournamentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the backing table if it does not exist
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tournament_records (
                id TEXT PRIMARY KEY,
                record JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn get(&self, id: &str) -> StoreResult<Option<Tournament>> {
        let row = sqlx::query("SELECT record FROM tournament_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(serde_json::from_value(row.get("record"))?)),
            None => Ok(None),
        }
    }

    async fn put(&self, tournament: &Tournament) -> StoreResult<()> {
        let record = serde_json::to_value(tournament)?;

        sqlx::query(
            r#"
            INSERT INTO tournament_records (id, record, created_at, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (id) DO UPDATE SET record = EXCLUDED.record, updated_at = NOW()
            "#,
        )
        .bind(&tournament.id)
        .bind(record)
        .bind(tournament.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Tournament>> {
        let rows = sqlx::query("SELECT record FROM tournament_records ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| Ok(serde_json::from_value(row.get("record"))?))
            .collect()
    }
}
