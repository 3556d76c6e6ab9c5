//! Skill ratings and matchmaking.
//!
//! Every resolved match feeds the global Elo table, whatever tournament it
//! belongs to. There is no separate ranked ladder.
//!
//! ## Example
//!
//! ```
//! use uppaws::rating::{SkillRatings, find_opponent};
//!
//! #[tokio::main]
//! async fn main() {
//!     let ratings = SkillRatings::default();
//!     let change = ratings.record_result("ash", "gary").await;
//!     assert!(change.winner_after > change.winner_before);
//!
//!     let opponent = find_opponent(&ratings, "misty", 100).await;
//!     assert_eq!(opponent.as_deref(), Some("ash"));
//! }
//! ```

pub mod elo;
pub mod matchmaking;

pub use elo::{
    DEFAULT_K_FACTOR, DEFAULT_RATING, SkillRatings, expected_score, updated_ratings,
};
pub use matchmaking::{DEFAULT_MATCHMAKING_WINDOW, find_opponent};
