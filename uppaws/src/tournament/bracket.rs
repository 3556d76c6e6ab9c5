//! Bracket generation for single-elimination and round-robin tournaments.
//!
//! Everything here is a pure function of the participant list: pairing order
//! is registration order, there is no seeding and no randomness.

use super::models::{Bracket, Match, MatchId, TournamentFormat, TrainerId};

/// Deterministic match id: `<tournament>-r<round>-m<index>`
pub fn match_id(tournament_id: &str, round: u32, index: usize) -> MatchId {
    format!("{tournament_id}-r{round}-m{index}")
}

/// Generate the rounds installed when a tournament starts.
///
/// Round robin yields a single round containing every pairing. Single
/// elimination yields only round 1; later rounds are paired from the winners
/// once the previous round is fully played (see [`advancing_pool`]).
pub fn generate_bracket(
    tournament_id: &str,
    format: TournamentFormat,
    participants: &[TrainerId],
) -> Vec<Bracket> {
    match format {
        TournamentFormat::RoundRobin => vec![round_robin_round(tournament_id, participants)],
        TournamentFormat::SingleElimination => {
            if participants.len() < 2 {
                Vec::new()
            } else {
                vec![single_elimination_round(tournament_id, 1, participants)]
            }
        }
    }
}

/// Pair adjacent entries of `pool` for one elimination round.
///
/// With an odd count the last entry receives the bye and no match is created
/// for it.
pub fn single_elimination_round(tournament_id: &str, round: u32, pool: &[TrainerId]) -> Bracket {
    let matches = pool
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| {
            Match::scheduled(
                match_id(tournament_id, round, index),
                pair[0].clone(),
                pair[1].clone(),
            )
        })
        .collect();

    let bye = if pool.len() % 2 == 1 {
        pool.last().cloned()
    } else {
        None
    };

    Bracket {
        round,
        matches,
        bye,
    }
}

/// Every unordered pair exactly once, all in round 1
pub fn round_robin_round(tournament_id: &str, participants: &[TrainerId]) -> Bracket {
    let mut matches = Vec::with_capacity(round_robin_match_count(participants.len()));
    for i in 0..participants.len() {
        for j in (i + 1)..participants.len() {
            let index = matches.len();
            matches.push(Match::scheduled(
                match_id(tournament_id, 1, index),
                participants[i].clone(),
                participants[j].clone(),
            ));
        }
    }

    Bracket {
        round: 1,
        matches,
        bye: None,
    }
}

/// Participants moving on from a fully played elimination round: match
/// winners in match order, then the bye.
///
/// Matches without a winner contribute nothing, so callers should only use
/// this once [`Bracket::is_completed`] holds.
pub fn advancing_pool(bracket: &Bracket) -> Vec<TrainerId> {
    bracket
        .matches
        .iter()
        .filter_map(|m| m.winner.clone())
        .chain(bracket.bye.clone())
        .collect()
}

/// n(n-1)/2
pub fn round_robin_match_count(participants: usize) -> usize {
    participants * participants.saturating_sub(1) / 2
}

/// Number of rounds a full tournament takes.
pub fn total_rounds(format: TournamentFormat, participants: usize) -> u32 {
    match format {
        TournamentFormat::SingleElimination => {
            if participants <= 1 {
                0
            } else {
                // ceil(log2(n)) without going through floats
                usize::BITS - (participants - 1).leading_zeros()
            }
        }
        TournamentFormat::RoundRobin => 1,
    }
}
