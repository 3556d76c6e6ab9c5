/// Property-based tests for bracket generation and Elo updates
///
/// These tests verify bracket shape and rating conservation across a wide
/// range of participant counts and ratings.
use chrono::{Duration, Utc};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use uppaws::db::InMemoryTournamentRepository;
use uppaws::economy::InMemoryEconomy;
use uppaws::rating::{DEFAULT_K_FACTOR, updated_ratings};
use uppaws::settings::TournamentSettings;
use uppaws::tournament::bracket::{
    advancing_pool, generate_bracket, round_robin_match_count, single_elimination_round,
    total_rounds,
};
use uppaws::tournament::{
    MatchResult, TournamentConfig, TournamentFormat, TournamentManager, TournamentStatus,
};

fn trainers(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("trainer_{i:03}")).collect()
}

// Smallest r with 2^r >= n
fn ceil_log2(n: usize) -> u32 {
    let mut rounds = 0;
    while (1usize << rounds) < n {
        rounds += 1;
    }
    rounds
}

proptest! {
    #[test]
    fn test_round_robin_pairs_everyone_once(n in 1usize..=24) {
        let ids = trainers(n);
        let rounds = generate_bracket("rr", TournamentFormat::RoundRobin, &ids);
        prop_assert_eq!(rounds.len(), 1);

        let matches = &rounds[0].matches;
        prop_assert_eq!(matches.len(), n * (n - 1) / 2);
        prop_assert_eq!(matches.len(), round_robin_match_count(n));

        let pairs: BTreeSet<(String, String)> = matches
            .iter()
            .map(|m| (m.player_one.clone(), m.player_two.clone()))
            .collect();
        prop_assert_eq!(pairs.len(), matches.len(), "no pairing repeats");
        prop_assert!(matches.iter().all(|m| m.player_one != m.player_two));
    }

    #[test]
    fn test_elimination_rounds_shrink_to_champion(n in 2usize..=64) {
        let mut pool = trainers(n);
        let mut round = 1;
        let mut total_matches = 0;

        while pool.len() > 1 {
            let mut bracket = single_elimination_round("se", round, &pool);
            prop_assert_eq!(bracket.matches.len(), pool.len() / 2);
            prop_assert_eq!(bracket.bye.is_some(), pool.len() % 2 == 1);

            for m in &mut bracket.matches {
                m.winner = Some(m.player_two.clone());
                m.status = uppaws::tournament::MatchStatus::Completed;
            }
            total_matches += bracket.matches.len();

            let next = advancing_pool(&bracket);
            prop_assert!(next.len() < pool.len(), "each round strictly shrinks the pool");
            prop_assert_eq!(next.len(), pool.len().div_ceil(2));
            pool = next;
            round += 1;
        }

        prop_assert_eq!(round - 1, ceil_log2(n));
        prop_assert_eq!(round - 1, total_rounds(TournamentFormat::SingleElimination, n));
        prop_assert_eq!(total_matches, n - 1, "every match eliminates exactly one trainer");
    }

    #[test]
    fn test_match_ids_are_unique(n in 2usize..=32) {
        let ids = trainers(n);
        let rounds = generate_bracket("t", TournamentFormat::RoundRobin, &ids);
        let unique: BTreeSet<&str> = rounds[0].matches.iter().map(|m| m.id.as_str()).collect();
        prop_assert_eq!(unique.len(), rounds[0].matches.len());
    }

    #[test]
    fn test_elo_is_zero_sum_within_rounding(
        winner in 100i32..=3000,
        loser in 100i32..=3000,
    ) {
        let (winner_after, loser_after) = updated_ratings(winner, loser, DEFAULT_K_FACTOR);
        let drift = (winner_after + loser_after) - (winner + loser);
        prop_assert!(drift.abs() <= 1, "total rating drift {} exceeds rounding", drift);
        prop_assert!(winner_after >= winner, "winner never loses points");
        prop_assert!(loser_after <= loser, "loser never gains points");
    }

    #[test]
    fn test_elo_upset_pays_more(gap in 1i32..=800) {
        let (favourite_win, _) = updated_ratings(1000 + gap, 1000, DEFAULT_K_FACTOR);
        let (underdog_win, _) = updated_ratings(1000, 1000 + gap, DEFAULT_K_FACTOR);
        prop_assert!(underdog_win - 1000 >= favourite_win - (1000 + gap));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_full_elimination_completes(n in 2usize..=16) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let (matches_played, status) = runtime.block_on(async {
            let manager = TournamentManager::new(
                Arc::new(InMemoryTournamentRepository::new()),
                Arc::new(InMemoryEconomy::new(0)),
                TournamentSettings::default(),
            );
            let config = TournamentConfig::single_elimination(
                "Property Cup",
                n,
                Utc::now() + Duration::hours(1),
            );
            let t = manager.create_tournament(config).await.unwrap();
            for id in trainers(n) {
                assert!(manager.register_participant(&t.id, &id).await);
            }
            manager.start_tournament(&t.id).await.unwrap();

            let mut played = 0;
            loop {
                let current = manager.get_tournament(&t.id).await.unwrap();
                if current.status != TournamentStatus::InProgress {
                    return (played, current.status);
                }
                let pending = current
                    .rounds
                    .iter()
                    .flat_map(|b| b.matches.iter())
                    .find(|m| !m.is_completed())
                    .cloned()
                    .unwrap();
                manager
                    .process_match(&pending.id, MatchResult::new(pending.player_one.clone()))
                    .await
                    .unwrap();
                played += 1;
            }
        });

        prop_assert_eq!(status, TournamentStatus::Completed);
        prop_assert_eq!(matches_played, n - 1);
    }
}
