//! Tournament simulator for the UpPaws engine.
//!
//! Registers a field of simulated trainers, plays every match with outcomes
//! drawn from the Elo expectation, and reports standings, ratings and prizes.

mod config;
mod logging;

use std::sync::Arc;

use anyhow::Error;
use chrono::{Duration, Utc};
use log::info;
use pico_args::Arguments;
use rand::{Rng, SeedableRng, rngs::StdRng};
use uppaws::{
    db::InMemoryTournamentRepository,
    economy::InMemoryEconomy,
    rating::{SkillRatings, expected_score},
    tournament::{
        Match, MatchResult, Prize, Tournament, TournamentConfig, TournamentManager,
        TournamentStatus,
    },
};

use config::{CliOverrides, SimConfig};

const HELP: &str = "\
Simulate an UpPaws tournament

USAGE:
  uppaws_sim [OPTIONS]

OPTIONS:
  --participants N         Number of simulated trainers  [default: env SIM_PARTICIPANTS or 8]
  --format       FORMAT    single | round-robin          [default: env SIM_FORMAT or single]
  --seed         S         RNG seed for match outcomes   [default: env SIM_SEED or random]

FLAGS:
  --weekly                 Run this week's cup instead of an ad-hoc tournament
  -h, --help               Print help information

ENVIRONMENT:
  RUST_LOG                 Log filter (e.g., info,uppaws=debug)
  UPPAWS_K_FACTOR          Elo K-factor
  UPPAWS_DEFAULT_RATING    Rating of unrated trainers
  (See TournamentSettings for all engine options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = CliOverrides {
        weekly: pargs.contains("--weekly"),
        participants: pargs.opt_value_from_str("--participants")?,
        format: pargs.opt_value_from_str("--format")?,
        seed: pargs.opt_value_from_str("--seed")?,
    };

    logging::init();

    let config = SimConfig::from_env(overrides)?;
    config.validate()?;

    info!(
        "Simulating {} {} tournament with {} trainers (seed {})",
        if config.weekly { "weekly" } else { "ad-hoc" },
        config.format,
        config.participants,
        config.seed
    );

    let economy = Arc::new(InMemoryEconomy::new(0));
    let manager = TournamentManager::new(
        Arc::new(InMemoryTournamentRepository::new()),
        economy.clone(),
        config.settings.clone(),
    );
    let ratings = manager.ratings().clone();

    let tournament = if config.weekly {
        manager.create_weekly_tournament().await?
    } else {
        let tournament_config = TournamentConfig {
            format: config.format,
            ..TournamentConfig::single_elimination(
                "Simulated Cup",
                config.participants,
                Utc::now() + Duration::hours(1),
            )
        }
        .with_prizes(Prize::weekly_pool());
        manager.create_tournament(tournament_config).await?
    };

    info!("Created tournament {} ({})", tournament.id, tournament.name);

    let trainers: Vec<String> = (1..=config.participants)
        .map(|i| format!("trainer_{i:03}"))
        .collect();
    for trainer in &trainers {
        if !manager.register_participant(&tournament.id, trainer).await {
            anyhow::bail!("Registration of {trainer} was rejected");
        }
    }

    manager.start_tournament(&tournament.id).await?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let played = play_out(&manager, &ratings, &tournament.id, &mut rng).await?;

    let standings = manager.get_tournament_standings(&tournament.id).await;
    logging::log_standings(&tournament.id, &standings);

    for entry in economy.all_entries().await {
        info!(
            "Ledger: {} +{} ({}, balance {})",
            entry.trainer_id, entry.amount, entry.entry_type, entry.balance_after
        );
    }

    if let Some(champion) = standings.first() {
        match manager.find_matchmaking_opponent(&champion.trainer_id).await {
            Some(opponent) => info!(
                "Next ranked opponent for {}: {}",
                champion.trainer_id, opponent
            ),
            None => info!(
                "No opponent within {} points of {}",
                config.settings.matchmaking_window, champion.trainer_id
            ),
        }
    }

    info!("Simulation finished after {} matches", played);

    Ok(())
}

/// Resolve pending matches until the tournament leaves `InProgress`.
///
/// Returns the number of matches played.
async fn play_out(
    manager: &TournamentManager,
    ratings: &SkillRatings,
    tournament_id: &str,
    rng: &mut StdRng,
) -> Result<usize, Error> {
    let mut played = 0;

    loop {
        let Some(current) = manager.get_tournament(tournament_id).await else {
            anyhow::bail!("Tournament {tournament_id} disappeared");
        };

        if current.status != TournamentStatus::InProgress {
            return Ok(played);
        }

        let Some(pending) = next_pending(&current) else {
            anyhow::bail!("Tournament {tournament_id} is in progress with nothing to play");
        };

        let one = ratings.rating(&pending.player_one).await;
        let two = ratings.rating(&pending.player_two).await;
        let (winner, loser) = if rng.random_bool(expected_score(one, two)) {
            (pending.player_one, pending.player_two)
        } else {
            (pending.player_two, pending.player_one)
        };

        let score = format!("{}-{}", rng.random_range(2..=3), rng.random_range(0..=1));
        let outcome = manager
            .process_match(&pending.id, MatchResult::new(winner.clone()).with_score(score))
            .await?;
        logging::log_match_result(&pending.id, &winner, &loser, &outcome.rating_change);

        if let Some(round) = outcome.next_round {
            info!("Round {} paired", round);
        }
        for grant in &outcome.grants {
            logging::log_grant(grant);
        }

        played += 1;
    }
}

fn next_pending(tournament: &Tournament) -> Option<Match> {
    tournament
        .rounds
        .iter()
        .flat_map(|b| b.matches.iter())
        .find(|m| !m.is_completed())
        .cloned()
}
