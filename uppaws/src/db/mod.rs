//! Storage for tournament records.
//!
//! The tournament engine talks to storage only through
//! [`TournamentRepository`]. Two implementations are provided:
//! - [`InMemoryTournamentRepository`] for tests and single-process hosts
//! - [`PgTournamentRepository`] backed by a PostgreSQL connection pool

use sqlx::postgres::{PgPool, PgPoolOptions};

pub mod config;
pub mod errors;
pub mod memory;
pub mod repository;

pub use config::DatabaseConfig;
pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryTournamentRepository;
pub use repository::{PgTournamentRepository, TournamentRepository};

/// PostgreSQL pool holding the tournament store
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect and, if configured, create the `tournament_records` table
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use uppaws::db::{Database, DatabaseConfig, TournamentRepository};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), uppaws::db::StoreError> {
    ///     let db = Database::connect(&DatabaseConfig::from_env()).await?;
    ///     let repository: Arc<dyn TournamentRepository> = Arc::new(db.tournaments());
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .connect(&config.database_url)
            .await?;

        let db = Self { pool };
        if config.create_schema {
            db.tournaments().ensure_schema().await?;
        }

        log::info!(
            "Connected tournament store (max {} connections)",
            config.max_connections
        );
        Ok(db)
    }

    /// Repository over this pool
    pub fn tournaments(&self) -> PgTournamentRepository {
        PgTournamentRepository::new(self.pool.clone())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query
    pub async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
