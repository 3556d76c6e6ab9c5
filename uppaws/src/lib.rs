//! # UpPaws
//!
//! Tournament and rating engine for the UpPaws creature-battling game.
//!
//! Trainers register for tournaments, play matches that resolve into
//! brackets, and accumulate a global Elo rating used for matchmaking.
//! Completed tournaments hand their prizes to the economy.
//!
//! ## Core Modules
//!
//! - [`tournament`]: Lifecycle, brackets, match resolution, weekly and seasonal events
//! - [`rating`]: Elo ratings and rating-window matchmaking
//! - [`economy`]: Prize distribution seam and an in-memory ledger
//! - [`db`]: Tournament record storage (in-memory and PostgreSQL)
//! - [`settings`]: Engine tunables loaded from the environment

/// Tournament record storage.
pub mod db;

/// Prize distribution and ledger.
pub mod economy;

/// Skill ratings and matchmaking.
pub mod rating;

pub mod settings;

/// Tournament lifecycle and events.
pub mod tournament;

pub use settings::TournamentSettings;
pub use tournament::{TournamentError, TournamentManager, TournamentResult};
