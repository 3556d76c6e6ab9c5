//! Economy seam: where tournament prizes end up.
//!
//! This module implements:
//! - The [`PrizeDistributor`] trait the tournament engine hands grants to
//! - An in-memory ledger with idempotency keys so a grant is applied once
//!
//! ## Example
//!
//! ```
//! use uppaws::economy::{InMemoryEconomy, PrizeDistributor};
//! use uppaws::tournament::{Prize, PrizeGrant};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let economy = InMemoryEconomy::new(0);
//!     let grant = PrizeGrant {
//!         tournament_id: "weekly_2026_43".to_string(),
//!         trainer_id: "ash".to_string(),
//!         rank: 1,
//!         prize: Prize::coins(500),
//!         idempotency_key: "weekly_2026_43:rank:1".to_string(),
//!     };
//!     economy.grant_prize(&grant).await?;
//!     assert_eq!(economy.balance("ash").await, 500);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{EconomyError, EconomyResult};
pub use manager::{InMemoryEconomy, PrizeDistributor};
pub use models::{Account, EntryType, LedgerEntry};
