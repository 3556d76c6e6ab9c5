//! Tournament manager: lifecycle, match resolution and read accessors.

use super::{
    bracket::{advancing_pool, generate_bracket, single_elimination_round},
    completion::{compute_prize_grants, is_tournament_complete, rank_participants},
    errors::{TournamentError, TournamentResult},
    models::{
        Match, MatchId, MatchOutcome, MatchResult, MatchStatus, Participant, Season, Standing,
        Tournament, TournamentConfig, TournamentFormat, TournamentId, TournamentStatus,
        TournamentVariant, TrainerId,
    },
    schedule,
};
use crate::{
    db::TournamentRepository,
    economy::PrizeDistributor,
    rating::{SkillRatings, find_opponent},
    settings::TournamentSettings,
};
use chrono::{DateTime, Datelike, Utc};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Tournament manager
///
/// Constructed once by the host and shared by handle. Every
/// read-modify-write on a tournament holds that tournament's lock from load
/// to save, so concurrent registrations cannot overfill it and a match result
/// is applied exactly once.
#[derive(Clone)]
pub struct TournamentManager {
    repository: Arc<dyn TournamentRepository>,
    economy: Arc<dyn PrizeDistributor>,
    ratings: Arc<SkillRatings>,
    settings: TournamentSettings,

    /// Per-tournament locks, held only for tournaments that can still change
    locks: Arc<Mutex<HashMap<TournamentId, Arc<Mutex<()>>>>>,

    /// Match id -> owning tournament, for tournaments in progress
    match_index: Arc<RwLock<HashMap<MatchId, TournamentId>>>,

    /// Serializes get-or-create of weekly and seasonal records
    creation_lock: Arc<Mutex<()>>,
}

impl TournamentManager {
    /// Create a new tournament manager with its own skill-rating table
    ///
    /// # Arguments
    ///
    /// * `repository` - Storage for tournament records
    /// * `economy` - Receiver of prize grants
    /// * `settings` - Engine tunables, including the Elo K-factor and default rating
    pub fn new(
        repository: Arc<dyn TournamentRepository>,
        economy: Arc<dyn PrizeDistributor>,
        settings: TournamentSettings,
    ) -> Self {
        let ratings = Arc::new(SkillRatings::from_settings(&settings));
        Self::assemble(repository, economy, ratings, settings)
    }

    /// Create a manager over an existing skill-rating table
    ///
    /// # Errors
    ///
    /// * `TournamentError::InvalidConfig` - The table's K-factor or default
    ///   rating disagrees with `settings`
    pub fn with_ratings(
        repository: Arc<dyn TournamentRepository>,
        economy: Arc<dyn PrizeDistributor>,
        ratings: Arc<SkillRatings>,
        settings: TournamentSettings,
    ) -> TournamentResult<Self> {
        if ratings.k_factor() != settings.k_factor
            || ratings.default_rating() != settings.default_rating
        {
            return Err(TournamentError::InvalidConfig(format!(
                "rating table uses K={} and default {}, settings say K={} and default {}",
                ratings.k_factor(),
                ratings.default_rating(),
                settings.k_factor,
                settings.default_rating
            )));
        }
        Ok(Self::assemble(repository, economy, ratings, settings))
    }

    fn assemble(
        repository: Arc<dyn TournamentRepository>,
        economy: Arc<dyn PrizeDistributor>,
        ratings: Arc<SkillRatings>,
        settings: TournamentSettings,
    ) -> Self {
        Self {
            repository,
            economy,
            ratings,
            settings,
            locks: Arc::new(Mutex::new(HashMap::new())),
            match_index: Arc::new(RwLock::new(HashMap::new())),
            creation_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn settings(&self) -> &TournamentSettings {
        &self.settings
    }

    pub fn ratings(&self) -> &Arc<SkillRatings> {
        &self.ratings
    }

    /// Create a new tournament in `Registration` status
    ///
    /// # Errors
    ///
    /// * `TournamentError::InvalidConfig` - Empty name or impossible capacity
    pub async fn create_tournament(
        &self,
        config: TournamentConfig,
    ) -> TournamentResult<Tournament> {
        validate_config(&config)?;

        let id = format!("tournament_{}", Uuid::new_v4().simple());
        let tournament =
            Tournament::from_config(id, config, TournamentVariant::Standard, Utc::now());
        self.repository.put(&tournament).await?;

        log::info!(
            "Created {} tournament {} ({}), capacity {}",
            tournament.format,
            tournament.id,
            tournament.name,
            tournament.max_participants
        );

        Ok(tournament)
    }

    /// Register a trainer, reporting rejections as `false`
    ///
    /// Returns `false` when the tournament does not exist, is no longer in
    /// registration, is full, its deadline has passed, or the trainer is
    /// already registered.
    pub async fn register_participant(&self, tournament_id: &str, trainer_id: &str) -> bool {
        match self.try_register_participant(tournament_id, trainer_id).await {
            Ok(_) => true,
            Err(e) if e.is_rule_violation() => {
                log::debug!(
                    "Registration of {} in {} rejected: {}",
                    trainer_id,
                    tournament_id,
                    e
                );
                false
            }
            Err(e) => {
                log::warn!(
                    "Registration of {} in {} failed: {}",
                    trainer_id,
                    tournament_id,
                    e
                );
                false
            }
        }
    }

    /// Register a trainer
    ///
    /// # Errors
    ///
    /// * `TournamentError::NotFound` - Unknown tournament
    /// * `TournamentError::InvalidState` - Not in registration
    /// * `TournamentError::TournamentFull` - Capacity reached
    /// * `TournamentError::RegistrationClosed` - Deadline passed
    /// * `TournamentError::AlreadyRegistered` - Duplicate trainer
    pub async fn try_register_participant(
        &self,
        tournament_id: &str,
        trainer_id: &str,
    ) -> TournamentResult<Participant> {
        let lock = self.lock_for(tournament_id).await?;
        let _guard = lock.lock().await;

        let mut tournament = self.load(tournament_id).await?;
        let now = Utc::now();

        if tournament.status != TournamentStatus::Registration {
            return Err(TournamentError::InvalidState {
                expected: TournamentStatus::Registration,
                actual: tournament.status,
            });
        }

        if tournament.is_full() {
            return Err(TournamentError::TournamentFull);
        }

        if now > tournament.registration_deadline {
            return Err(TournamentError::RegistrationClosed);
        }

        if tournament.is_registered(trainer_id) {
            return Err(TournamentError::AlreadyRegistered(trainer_id.to_string()));
        }

        let participant = Participant::new(trainer_id.to_string(), now);
        tournament.participants.push(participant.clone());
        self.repository.put(&tournament).await?;

        log::debug!(
            "Registered {} in {} ({}/{})",
            trainer_id,
            tournament_id,
            tournament.participants.len(),
            tournament.max_participants
        );

        Ok(participant)
    }

    /// Close registration and generate the opening round
    ///
    /// The participant list is snapshotted here; later registrations are
    /// impossible because the status leaves `Registration`.
    ///
    /// # Errors
    ///
    /// * `TournamentError::NotFound` - Unknown tournament
    /// * `TournamentError::InvalidState` - Not in registration
    /// * `TournamentError::InsufficientParticipants` - Below the configured minimum
    pub async fn start_tournament(&self, tournament_id: &str) -> TournamentResult<()> {
        let lock = self.lock_for(tournament_id).await?;
        let _guard = lock.lock().await;

        let mut tournament = self.load(tournament_id).await?;

        if tournament.status != TournamentStatus::Registration {
            return Err(TournamentError::InvalidState {
                expected: TournamentStatus::Registration,
                actual: tournament.status,
            });
        }

        if tournament.participants.len() < tournament.min_participants {
            return Err(TournamentError::InsufficientParticipants {
                needed: tournament.min_participants,
                current: tournament.participants.len(),
            });
        }

        tournament.rounds = generate_bracket(
            &tournament.id,
            tournament.format,
            &tournament.participant_ids(),
        );
        tournament.status = TournamentStatus::InProgress;
        tournament.started_at = Some(Utc::now());
        self.repository.put(&tournament).await?;

        let new_matches: Vec<&Match> = tournament
            .rounds
            .iter()
            .flat_map(|b| b.matches.iter())
            .collect();
        self.index_matches(&tournament.id, new_matches).await;

        log::info!(
            "Started tournament {} with {} participants and {} matches",
            tournament.id,
            tournament.participants.len(),
            tournament.match_count()
        );

        Ok(())
    }

    /// Cancel a tournament that has not completed
    ///
    /// # Errors
    ///
    /// * `TournamentError::NotFound` - Unknown tournament
    /// * `TournamentError::NotCancellable` - Already completed or cancelled
    pub async fn cancel_tournament(&self, tournament_id: &str) -> TournamentResult<()> {
        let lock = self.lock_for(tournament_id).await?;
        let _guard = lock.lock().await;

        let mut tournament = self.load(tournament_id).await?;

        if !tournament
            .status
            .can_transition_to(TournamentStatus::Cancelled)
        {
            return Err(TournamentError::NotCancellable(tournament.status));
        }

        tournament.status = TournamentStatus::Cancelled;
        tournament.cancelled_at = Some(Utc::now());
        self.repository.put(&tournament).await?;
        self.release(&tournament).await;

        log::info!("Cancelled tournament {}", tournament_id);
        Ok(())
    }

    /// Apply a reported result to its match
    ///
    /// Marks the match completed, updates win/loss counters (and elimination
    /// in single elimination), applies the Elo update, generates the next
    /// elimination round once the current one is fully played, and completes
    /// the tournament when nothing is left to play. Prizes are handed to the
    /// economy on completion.
    ///
    /// The tournament is saved before ratings and prizes are touched, so a
    /// storage failure leaves no partial effects.
    ///
    /// # Errors
    ///
    /// * `TournamentError::MatchNotFound` - No tournament holds this match
    /// * `TournamentError::InvalidState` - Owning tournament not in progress
    /// * `TournamentError::MatchAlreadyCompleted` - Result already recorded
    /// * `TournamentError::InvalidWinner` - Winner does not play in the match
    pub async fn process_match(
        &self,
        match_id: &str,
        result: MatchResult,
    ) -> TournamentResult<MatchOutcome> {
        let Some(tournament_id) = self.locate_match(match_id).await? else {
            log::warn!("Result reported for unknown match {}", match_id);
            return Err(TournamentError::MatchNotFound(match_id.to_string()));
        };

        let lock = self.lock_for(&tournament_id).await?;
        let _guard = lock.lock().await;

        let mut tournament = self.load(&tournament_id).await?;

        if tournament.status != TournamentStatus::InProgress {
            return Err(TournamentError::InvalidState {
                expected: TournamentStatus::InProgress,
                actual: tournament.status,
            });
        }

        let format = tournament.format;
        let loser = {
            let game = tournament
                .find_match_mut(match_id)
                .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;

            if game.is_completed() {
                return Err(TournamentError::MatchAlreadyCompleted(match_id.to_string()));
            }

            let loser = game.opponent_of(&result.winner).cloned().ok_or_else(|| {
                TournamentError::InvalidWinner {
                    match_id: match_id.to_string(),
                    winner: result.winner.clone(),
                }
            })?;

            game.status = MatchStatus::Completed;
            game.winner = Some(result.winner.clone());
            game.score = result.score.clone();
            game.completed_at = Some(Utc::now());
            loser
        };

        if let Some(winner) = tournament.participant_mut(&result.winner) {
            winner.wins += 1;
        }
        if let Some(loser) = tournament.participant_mut(&loser) {
            loser.losses += 1;
            if format == TournamentFormat::SingleElimination {
                loser.eliminated = true;
            }
        }

        let next_round = advance_single_elimination(&mut tournament);

        let completed = is_tournament_complete(&tournament);
        let grants = if completed {
            tournament.status = TournamentStatus::Completed;
            tournament.completed_at = Some(Utc::now());
            compute_prize_grants(&tournament)
        } else {
            Vec::new()
        };

        self.repository.put(&tournament).await?;

        if let Some(round) = next_round {
            let new_matches: Vec<&Match> = tournament
                .rounds
                .iter()
                .filter(|b| b.round == round)
                .flat_map(|b| b.matches.iter())
                .collect();
            self.index_matches(&tournament.id, new_matches).await;
            log::info!("Tournament {} advanced to round {}", tournament.id, round);
        }

        let rating_change = self.ratings.record_result(&result.winner, &loser).await;

        if completed {
            self.release(&tournament).await;
            log::info!("Tournament {} completed", tournament.id);
            for grant in &grants {
                if let Err(e) = self.economy.grant_prize(grant).await {
                    log::error!(
                        "Failed to grant rank {} prize to {} for {}: {}",
                        grant.rank,
                        grant.trainer_id,
                        grant.tournament_id,
                        e
                    );
                }
            }
        }

        Ok(MatchOutcome {
            tournament_id: tournament.id,
            match_id: match_id.to_string(),
            rating_change,
            next_round,
            completed,
            grants,
        })
    }

    /// Get or create this week's cup
    pub async fn create_weekly_tournament(&self) -> TournamentResult<Tournament> {
        self.create_weekly_tournament_at(Utc::now()).await
    }

    /// Get or create the weekly cup for the week containing `now`.
    ///
    /// Calling this twice in one week returns the same record.
    pub async fn create_weekly_tournament_at(
        &self,
        now: DateTime<Utc>,
    ) -> TournamentResult<Tournament> {
        let _guard = self.creation_lock.lock().await;

        let details = schedule::weekly_details(now);
        let id = schedule::weekly_tournament_id(details.year, details.week);

        if let Some(existing) = self.repository.get(&id).await? {
            return Ok(existing);
        }

        let config = schedule::weekly_config(&details, now, &self.settings);
        let tournament =
            Tournament::from_config(id, config, TournamentVariant::Weekly(details), now);
        self.repository.put(&tournament).await?;

        log::info!("Created weekly tournament {}", tournament.id);
        Ok(tournament)
    }

    /// Get or create the league for `season` of `year`
    pub async fn create_seasonal_league(
        &self,
        season: Season,
        year: i32,
    ) -> TournamentResult<Tournament> {
        let _guard = self.creation_lock.lock().await;

        let id = schedule::seasonal_league_id(season, year);

        if let Some(existing) = self.repository.get(&id).await? {
            return Ok(existing);
        }

        let now = Utc::now();
        let config = schedule::seasonal_config(season, year, now, &self.settings);
        let tournament = Tournament::from_config(
            id,
            config,
            TournamentVariant::Seasonal(schedule::season_details(season, year)),
            now,
        );
        self.repository.put(&tournament).await?;

        log::info!("Created seasonal league {}", tournament.id);
        Ok(tournament)
    }

    /// Get or create the league for the season containing today
    pub async fn create_current_seasonal_league(&self) -> TournamentResult<Tournament> {
        let today = Utc::now().date_naive();
        self.create_seasonal_league(Season::for_month(today.month()), today.year())
            .await
    }

    /// Get a tournament by id
    pub async fn get_tournament(&self, tournament_id: &str) -> Option<Tournament> {
        match self.repository.get(tournament_id).await {
            Ok(tournament) => tournament,
            Err(e) => {
                log::warn!("Failed to load tournament {}: {}", tournament_id, e);
                None
            }
        }
    }

    /// Tournaments currently being played
    pub async fn get_active_tournaments(&self) -> Vec<Tournament> {
        self.list_with_status(TournamentStatus::InProgress).await
    }

    /// Tournaments still accepting registrations
    pub async fn get_upcoming_tournaments(&self) -> Vec<Tournament> {
        self.list_with_status(TournamentStatus::Registration).await
    }

    /// Standings by wins, ties in registration order. Empty for unknown ids.
    pub async fn get_tournament_standings(&self, tournament_id: &str) -> Vec<Standing> {
        let Some(tournament) = self.get_tournament(tournament_id).await else {
            return Vec::new();
        };

        let mut standings = Vec::with_capacity(tournament.participants.len());
        for (index, participant) in rank_participants(&tournament).into_iter().enumerate() {
            standings.push(Standing {
                rank: index + 1,
                trainer_id: participant.trainer_id.clone(),
                wins: participant.wins,
                losses: participant.losses,
                eliminated: participant.eliminated,
                rating: self.ratings.rating(&participant.trainer_id).await,
            });
        }
        standings
    }

    /// Look up a single match
    pub async fn get_match(&self, match_id: &str) -> Option<Match> {
        let tournament_id = self.locate_match(match_id).await.ok().flatten()?;
        self.get_tournament(&tournament_id)
            .await?
            .find_match(match_id)
            .cloned()
    }

    /// Current skill rating (default for trainers that never played)
    pub async fn get_player_skill_rating(&self, trainer_id: &str) -> i32 {
        self.ratings.rating(trainer_id).await
    }

    /// Closest rated opponent within the matchmaking window
    pub async fn find_matchmaking_opponent(&self, trainer_id: &str) -> Option<TrainerId> {
        find_opponent(&self.ratings, trainer_id, self.settings.matchmaking_window).await
    }

    async fn list_with_status(&self, status: TournamentStatus) -> Vec<Tournament> {
        match self.repository.list().await {
            Ok(all) => all.into_iter().filter(|t| t.status == status).collect(),
            Err(e) => {
                log::warn!("Failed to list tournaments: {}", e);
                Vec::new()
            }
        }
    }

    async fn load(&self, tournament_id: &str) -> TournamentResult<Tournament> {
        self.repository
            .get(tournament_id)
            .await?
            .ok_or_else(|| TournamentError::NotFound(tournament_id.to_string()))
    }

    /// Lock guarding one tournament's read-modify-write.
    ///
    /// Entries are created only for stored tournaments that are not terminal.
    /// Terminal records are never written again, so callers touching them get
    /// a private lock and are rejected by the status check that follows.
    async fn lock_for(&self, tournament_id: &str) -> TournamentResult<Arc<Mutex<()>>> {
        if let Some(lock) = self.locks.lock().await.get(tournament_id) {
            return Ok(lock.clone());
        }

        let tournament = self.load(tournament_id).await?;
        if tournament.status.is_terminal() {
            return Ok(Arc::new(Mutex::new(())));
        }

        let mut locks = self.locks.lock().await;
        Ok(locks
            .entry(tournament.id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }

    /// Forget the lock and indexed matches of a tournament that just became
    /// terminal. Called with that tournament's lock held.
    async fn release(&self, tournament: &Tournament) {
        self.locks.lock().await.remove(&tournament.id);

        let mut index = self.match_index.write().await;
        for m in tournament.rounds.iter().flat_map(|b| b.matches.iter()) {
            index.remove(&m.id);
        }
    }

    async fn index_matches(&self, tournament_id: &str, matches: Vec<&Match>) {
        let mut index = self.match_index.write().await;
        for m in matches {
            index.insert(m.id.clone(), tournament_id.to_string());
        }
    }

    /// Owning tournament of a match: index first, then a scan of storage for
    /// records the index has not seen (e.g. written by another process).
    /// Only matches of tournaments in progress are cached.
    async fn locate_match(&self, match_id: &str) -> TournamentResult<Option<TournamentId>> {
        if let Some(id) = self.match_index.read().await.get(match_id) {
            return Ok(Some(id.clone()));
        }

        let Some(owner) = self
            .repository
            .list()
            .await?
            .into_iter()
            .find(|t| t.find_match(match_id).is_some())
        else {
            return Ok(None);
        };

        if owner.status == TournamentStatus::InProgress {
            self.match_index
                .write()
                .await
                .insert(match_id.to_string(), owner.id.clone());
        }

        Ok(Some(owner.id))
    }
}

/// Pair the next elimination round once the latest one is fully played.
///
/// Returns the new round number, if one was generated.
fn advance_single_elimination(tournament: &mut Tournament) -> Option<u32> {
    if tournament.format != TournamentFormat::SingleElimination {
        return None;
    }

    let last = tournament.rounds.last()?;
    if !last.is_completed() {
        return None;
    }

    let pool = advancing_pool(last);
    if pool.len() < 2 {
        return None;
    }

    let round = last.round + 1;
    let bracket = single_elimination_round(&tournament.id, round, &pool);
    tournament.rounds.push(bracket);
    Some(round)
}

fn validate_config(config: &TournamentConfig) -> TournamentResult<()> {
    if config.name.trim().is_empty() {
        return Err(TournamentError::InvalidConfig(
            "name must not be empty".to_string(),
        ));
    }

    if config.min_participants < 2 {
        return Err(TournamentError::InvalidConfig(
            "at least two participants are required".to_string(),
        ));
    }

    if config.max_participants < config.min_participants {
        return Err(TournamentError::InvalidConfig(format!(
            "capacity {} is below the minimum of {}",
            config.max_participants, config.min_participants
        )));
    }

    Ok(())
}
