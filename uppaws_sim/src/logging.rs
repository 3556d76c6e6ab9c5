//! Structured logging configuration.
//!
//! The engine logs through the `log` facade; `init` installs a tracing
//! subscriber that also collects those records.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uppaws::tournament::{PrizeGrant, RatingChange, Standing};

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,uppaws=info,sqlx=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Structured logging initialized");
}

/// Log the rating movement caused by one match
pub fn log_match_result(match_id: &str, winner: &str, loser: &str, change: &RatingChange) {
    tracing::info!(
        match_id = match_id,
        winner = winner,
        loser = loser,
        winner_rating = change.winner_after,
        loser_rating = change.loser_after,
        "Match resolved: {} beat {} ({:+} / {:+})",
        winner,
        loser,
        change.winner_after - change.winner_before,
        change.loser_after - change.loser_before
    );
}

/// Log a final standings table, one line per trainer
pub fn log_standings(tournament_id: &str, standings: &[Standing]) {
    tracing::info!(tournament_id = tournament_id, "Final standings:");
    for row in standings {
        tracing::info!(
            rank = row.rank,
            trainer_id = row.trainer_id.as_str(),
            "  {:>3}. {:<16} {:>2}W {:>2}L  rating {}",
            row.rank,
            row.trainer_id,
            row.wins,
            row.losses,
            row.rating
        );
    }
}

/// Log a prize handed to the economy
pub fn log_grant(grant: &PrizeGrant) {
    tracing::info!(
        tournament_id = grant.tournament_id.as_str(),
        trainer_id = grant.trainer_id.as_str(),
        rank = grant.rank,
        currency = grant.prize.currency,
        items = grant.prize.items.len(),
        "Prize for rank {}: {} coins{}",
        grant.rank,
        grant.prize.currency,
        grant
            .prize
            .title
            .as_deref()
            .map(|t| format!(", title \"{t}\""))
            .unwrap_or_default()
    );
}
