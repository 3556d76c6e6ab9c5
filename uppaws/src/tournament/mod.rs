//! Tournament module for bracket and league play.
//!
//! This module provides tournament management functionality including:
//! - Tournament creation, registration and cancellation
//! - Single-elimination brackets with byes, generated round by round
//! - Round-robin schedules
//! - Match resolution feeding the global Elo table
//! - Completion detection and prize distribution
//! - Weekly cups and seasonal leagues
//!
//! ## Example
//!
//! ```
//! use uppaws::db::InMemoryTournamentRepository;
//! use uppaws::economy::InMemoryEconomy;
//! use uppaws::settings::TournamentSettings;
//! use uppaws::tournament::{MatchResult, TournamentConfig, TournamentManager};
//! use chrono::{Duration, Utc};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = TournamentManager::new(
//!         Arc::new(InMemoryTournamentRepository::new()),
//!         Arc::new(InMemoryEconomy::new(0)),
//!         TournamentSettings::default(),
//!     );
//!
//!     let config =
//!         TournamentConfig::single_elimination("Paw Cup", 2, Utc::now() + Duration::hours(1));
//!     let tournament = manager.create_tournament(config).await?;
//!     assert!(manager.register_participant(&tournament.id, "ash").await);
//!     assert!(manager.register_participant(&tournament.id, "gary").await);
//!
//!     manager.start_tournament(&tournament.id).await?;
//!     let final_match = format!("{}-r1-m0", tournament.id);
//!     let outcome = manager.process_match(&final_match, MatchResult::new("ash")).await?;
//!     assert!(outcome.completed);
//!     Ok(())
//! }
//! ```

pub mod bracket;
pub mod completion;
pub mod errors;
pub mod manager;
pub mod models;
pub mod schedule;

pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{
    Bracket, Division, Match, MatchId, MatchOutcome, MatchResult, MatchStatus, Participant,
    Prize, PrizeGrant, RatingChange, Season, SeasonDetails, Standing, Tournament,
    TournamentConfig, TournamentFormat, TournamentId, TournamentStatus, TournamentVariant,
    TrainerId, WeeklyDetails,
};
