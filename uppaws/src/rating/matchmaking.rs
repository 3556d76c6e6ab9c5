//! Rating-window opponent search.

use super::elo::SkillRatings;
use crate::tournament::models::TrainerId;

/// Default half-width of the acceptable rating window
pub const DEFAULT_MATCHMAKING_WINDOW: i32 = 100;

/// Find the rated trainer closest to `trainer_id`'s rating.
///
/// Only trainers within `window` points (inclusive) qualify. Ties go to the
/// smallest trainer id. The requester does not need to be rated yet; the
/// table's default rating is used for them. A negative window matches
/// nobody.
pub async fn find_opponent(
    ratings: &SkillRatings,
    trainer_id: &str,
    window: i32,
) -> Option<TrainerId> {
    let window = u32::try_from(window).ok()?;
    let own_rating = ratings.rating(trainer_id).await;

    ratings
        .snapshot()
        .await
        .into_iter()
        .filter(|(id, _)| id != trainer_id)
        .map(|(id, rating)| (rating.abs_diff(own_rating), id))
        .filter(|(distance, _)| *distance <= window)
        .min()
        .map(|(_, id)| id)
}
