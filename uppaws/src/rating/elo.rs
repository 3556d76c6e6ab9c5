//! Elo rating calculation and the global skill-rating table.

use crate::settings::TournamentSettings;
use crate::tournament::models::{RatingChange, TrainerId};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Rating assigned to trainers that have never played
pub const DEFAULT_RATING: i32 = 1000;

/// Fixed adjustment factor
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Probability that `rating` beats `opponent_rating`
pub fn expected_score(rating: i32, opponent_rating: i32) -> f64 {
    let gap = i64::from(opponent_rating) - i64::from(rating);
    1.0 / (1.0 + 10.0_f64.powf(gap as f64 / 400.0))
}

/// Paired update for a decided match. Returns `(new_winner, new_loser)`.
pub fn updated_ratings(winner: i32, loser: i32, k_factor: f64) -> (i32, i32) {
    let expected_winner = expected_score(winner, loser);
    let new_winner = (f64::from(winner) + k_factor * (1.0 - expected_winner)).round() as i32;
    let new_loser = (f64::from(loser) + k_factor * (0.0 - (1.0 - expected_winner))).round() as i32;
    (new_winner, new_loser)
}

/// Global trainer -> rating map.
///
/// Entries are created on first result and never removed. Ordered by trainer
/// id so scans are deterministic.
#[derive(Debug)]
pub struct SkillRatings {
    ratings: RwLock<BTreeMap<TrainerId, i32>>,
    default_rating: i32,
    k_factor: f64,
}

impl SkillRatings {
    /// Create an empty table with the given defaults
    pub fn new(default_rating: i32, k_factor: f64) -> Self {
        Self {
            ratings: RwLock::new(BTreeMap::new()),
            default_rating,
            k_factor,
        }
    }

    /// Empty table using the engine's configured K-factor and default rating
    pub fn from_settings(settings: &TournamentSettings) -> Self {
        Self::new(settings.default_rating, settings.k_factor)
    }

    pub fn default_rating(&self) -> i32 {
        self.default_rating
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    /// Current rating, or the default for unknown trainers
    pub async fn rating(&self, trainer_id: &str) -> i32 {
        self.ratings
            .read()
            .await
            .get(trainer_id)
            .copied()
            .unwrap_or(self.default_rating)
    }

    /// Apply the Elo update for one decided match.
    ///
    /// Both sides are read and written under a single write lock.
    pub async fn record_result(&self, winner: &str, loser: &str) -> RatingChange {
        let mut ratings = self.ratings.write().await;

        let winner_before = ratings.get(winner).copied().unwrap_or(self.default_rating);
        let loser_before = ratings.get(loser).copied().unwrap_or(self.default_rating);
        let (winner_after, loser_after) =
            updated_ratings(winner_before, loser_before, self.k_factor);

        ratings.insert(winner.to_string(), winner_after);
        ratings.insert(loser.to_string(), loser_after);

        log::debug!(
            "Rating update: {} {} -> {}, {} {} -> {}",
            winner,
            winner_before,
            winner_after,
            loser,
            loser_before,
            loser_after
        );

        RatingChange {
            winner_before,
            winner_after,
            loser_before,
            loser_after,
        }
    }

    /// Copy of every rated trainer, ordered by id
    pub async fn snapshot(&self) -> Vec<(TrainerId, i32)> {
        self.ratings
            .read()
            .await
            .iter()
            .map(|(id, rating)| (id.clone(), *rating))
            .collect()
    }

    /// Seed a rating, e.g. when restoring from an external leaderboard
    pub async fn set_rating(&self, trainer_id: impl Into<TrainerId>, rating: i32) {
        self.ratings.write().await.insert(trainer_id.into(), rating);
    }

    pub async fn len(&self) -> usize {
        self.ratings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.ratings.read().await.is_empty()
    }
}

impl Default for SkillRatings {
    fn default() -> Self {
        Self::new(DEFAULT_RATING, DEFAULT_K_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_score_equal_ratings() {
        let e = expected_score(1000, 1000);
        assert!((e - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_expected_score_higher_rated() {
        let e = expected_score(1300, 1000);
        assert!(e > 0.8);
        assert!(e < 1.0);
    }

    #[test]
    fn test_equal_ratings_move_by_half_k() {
        assert_eq!(updated_ratings(1000, 1000, DEFAULT_K_FACTOR), (1016, 984));
    }

    #[test]
    fn test_upset_moves_more_than_expected_win() {
        let (underdog_after, _) = updated_ratings(900, 1100, DEFAULT_K_FACTOR);
        let (favourite_after, _) = updated_ratings(1100, 900, DEFAULT_K_FACTOR);
        assert!(underdog_after - 900 > favourite_after - 1100);
    }

    #[test]
    fn test_zero_sum_within_rounding() {
        let (w, l) = updated_ratings(1234, 987, DEFAULT_K_FACTOR);
        let drift = (w + l) - (1234 + 987);
        assert!(drift.abs() <= 1);
    }

    #[tokio::test]
    async fn test_unknown_trainer_has_default_rating() {
        let ratings = SkillRatings::default();
        assert_eq!(ratings.rating("nobody").await, DEFAULT_RATING);
        assert!(ratings.is_empty().await);
    }

    #[tokio::test]
    async fn test_record_result_persists_both_sides() {
        let ratings = SkillRatings::default();
        let change = ratings.record_result("ash", "gary").await;

        assert_eq!(change.winner_before, 1000);
        assert_eq!(change.winner_after, 1016);
        assert_eq!(change.loser_after, 984);
        assert_eq!(ratings.rating("ash").await, 1016);
        assert_eq!(ratings.rating("gary").await, 984);
        assert_eq!(ratings.len().await, 2);
    }

    #[tokio::test]
    async fn test_custom_k_factor() {
        let ratings = SkillRatings::new(1500, 16.0);
        let change = ratings.record_result("a", "b").await;
        assert_eq!(change.winner_after, 1508);
        assert_eq!(change.loser_after, 1492);
    }

    #[test]
    fn test_expected_score_at_extremes() {
        let e = expected_score(i32::MIN, i32::MAX);
        assert!(e >= 0.0 && e < 0.001);
        let e = expected_score(i32::MAX, i32::MIN);
        assert!(e > 0.999 && e <= 1.0);
    }

    #[tokio::test]
    async fn test_from_settings() {
        let settings = TournamentSettings {
            k_factor: 16.0,
            default_rating: 1500,
            ..TournamentSettings::default()
        };
        let ratings = SkillRatings::from_settings(&settings);
        assert_eq!(ratings.default_rating(), 1500);
        assert_eq!(ratings.k_factor(), 16.0);
        assert_eq!(ratings.rating("nobody").await, 1500);
    }

    #[tokio::test]
    async fn test_snapshot_is_sorted_by_id() {
        let ratings = SkillRatings::default();
        ratings.set_rating("zed", 1200).await;
        ratings.set_rating("amy", 900).await;
        let snapshot = ratings.snapshot().await;
        assert_eq!(
            snapshot,
            vec![("amy".to_string(), 900), ("zed".to_string(), 1200)]
        );
    }
}
