//! Completion detection and prize ranking.

use super::bracket::advancing_pool;
use super::models::{Participant, PrizeGrant, Tournament, TournamentFormat};

/// Whether every match has been played and no further round is pending.
///
/// Byes never create match records, so they cannot hold a tournament open.
/// A single-elimination tournament whose last round leaves more than one
/// participant standing still needs another round.
pub fn is_tournament_complete(tournament: &Tournament) -> bool {
    let Some(last) = tournament.rounds.last() else {
        return false;
    };

    if !tournament.rounds.iter().all(|round| round.is_completed()) {
        return false;
    }

    match tournament.format {
        TournamentFormat::RoundRobin => true,
        TournamentFormat::SingleElimination => advancing_pool(last).len() <= 1,
    }
}

/// Participants ordered by wins, most first. Ties keep registration order.
pub fn rank_participants(tournament: &Tournament) -> Vec<&Participant> {
    let mut ranked: Vec<&Participant> = tournament.participants.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.wins.cmp(&a.wins));
    ranked
}

/// Pair each prize with the participant at the same rank.
///
/// Extra prizes beyond the participant count are dropped.
pub fn compute_prize_grants(tournament: &Tournament) -> Vec<PrizeGrant> {
    rank_participants(tournament)
        .into_iter()
        .zip(tournament.prizes.iter())
        .enumerate()
        .map(|(index, (participant, prize))| {
            let rank = index + 1;
            PrizeGrant {
                tournament_id: tournament.id.clone(),
                trainer_id: participant.trainer_id.clone(),
                rank,
                prize: prize.clone(),
                idempotency_key: format!("{}:rank:{}", tournament.id, rank),
            }
        })
        .collect()
}
