//! Tournament data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tournament ID type
pub type TournamentId = String;

/// Match ID type
pub type MatchId = String;

/// Trainer ID type (owned by the trainer profile collaborator)
pub type TrainerId = String;

/// Tournament format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Losers are removed, winners advance round by round
    SingleElimination,
    /// Every pair of participants meets exactly once
    RoundRobin,
}

impl std::fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentFormat::SingleElimination => write!(f, "single_elimination"),
            TournamentFormat::RoundRobin => write!(f, "round_robin"),
        }
    }
}

/// Tournament lifecycle status
///
/// Transitions only move forward: `Registration -> InProgress -> Completed`.
/// `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Accepting registrations
    Registration,
    /// Bracket generated, matches being played
    InProgress,
    /// Every match resolved and prizes handed out
    Completed,
    /// Called off before completion
    Cancelled,
}

impl TournamentStatus {
    /// Whether `next` is a legal successor of this status.
    pub fn can_transition_to(self, next: TournamentStatus) -> bool {
        matches!(
            (self, next),
            (TournamentStatus::Registration, TournamentStatus::InProgress)
                | (TournamentStatus::InProgress, TournamentStatus::Completed)
                | (TournamentStatus::Registration, TournamentStatus::Cancelled)
                | (TournamentStatus::InProgress, TournamentStatus::Cancelled)
        )
    }

    /// `Completed` or `Cancelled`; the record never changes again.
    pub fn is_terminal(self) -> bool {
        matches!(self, TournamentStatus::Completed | TournamentStatus::Cancelled)
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentStatus::Registration => write!(f, "registration"),
            TournamentStatus::InProgress => write!(f, "in_progress"),
            TournamentStatus::Completed => write!(f, "completed"),
            TournamentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Completed,
}

/// A trainer's enrollment in one tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub trainer_id: TrainerId,
    pub registered_at: DateTime<Utc>,
    pub wins: u32,
    pub losses: u32,
    pub eliminated: bool,
}

impl Participant {
    /// Fresh participant with zeroed counters
    pub fn new(trainer_id: TrainerId, registered_at: DateTime<Utc>) -> Self {
        Self {
            trainer_id,
            registered_at,
            wins: 0,
            losses: 0,
            eliminated: false,
        }
    }
}

/// A single pairing inside a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub player_one: TrainerId,
    pub player_two: TrainerId,
    pub status: MatchStatus,
    pub winner: Option<TrainerId>,
    pub score: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Match {
    /// Create a scheduled match between two participants
    pub fn scheduled(id: MatchId, player_one: TrainerId, player_two: TrainerId) -> Self {
        Self {
            id,
            player_one,
            player_two,
            status: MatchStatus::Scheduled,
            winner: None,
            score: None,
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Whether the trainer plays in this match
    pub fn involves(&self, trainer_id: &str) -> bool {
        self.player_one == trainer_id || self.player_two == trainer_id
    }

    /// The other side of the match, if `trainer_id` plays in it
    pub fn opponent_of(&self, trainer_id: &str) -> Option<&TrainerId> {
        if self.player_one == trainer_id {
            Some(&self.player_two)
        } else if self.player_two == trainer_id {
            Some(&self.player_one)
        } else {
            None
        }
    }
}

/// One round of a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Round number (1-indexed)
    pub round: u32,
    /// Matches in pairing order
    pub matches: Vec<Match>,
    /// Participant advanced without a match this round
    pub bye: Option<TrainerId>,
}

impl Bracket {
    pub fn is_completed(&self) -> bool {
        self.matches.iter().all(Match::is_completed)
    }
}

/// Reward for a finishing rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    /// Paw coins credited to the trainer
    pub currency: i64,
    /// Inventory item ids granted
    pub items: Vec<String>,
    /// Optional cosmetic title
    pub title: Option<String>,
}

impl Prize {
    pub fn coins(currency: i64) -> Self {
        Self {
            currency,
            items: Vec::new(),
            title: None,
        }
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Standard prize table for weekly events: top three places are paid
    pub fn weekly_pool() -> Vec<Prize> {
        vec![
            Prize::coins(500)
                .with_item("golden_paw_trophy")
                .with_title("Weekly Champion"),
            Prize::coins(250).with_item("silver_paw_trophy"),
            Prize::coins(100),
        ]
    }

    /// Prize table for seasonal leagues
    pub fn seasonal_pool() -> Vec<Prize> {
        vec![
            Prize::coins(2000)
                .with_item("season_crown")
                .with_title("Season Champion"),
            Prize::coins(1000).with_item("season_medal"),
            Prize::coins(500).with_item("season_medal"),
            Prize::coins(250),
        ]
    }
}

/// Prize handed to the economy collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeGrant {
    pub tournament_id: TournamentId,
    pub trainer_id: TrainerId,
    /// Finishing rank (1-indexed)
    pub rank: usize,
    pub prize: Prize,
    /// Unique per tournament and rank
    pub idempotency_key: String,
}

/// Season of the year for leagues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Spring => write!(f, "spring"),
            Season::Summer => write!(f, "summer"),
            Season::Autumn => write!(f, "autumn"),
            Season::Winter => write!(f, "winter"),
        }
    }
}

/// League division with promotion and relegation slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub name: String,
    /// 1 is the top tier
    pub tier: u8,
    pub promotion_slots: u8,
    pub relegation_slots: u8,
    pub members: Vec<TrainerId>,
}

/// Extra fields carried by weekly tournaments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyDetails {
    pub year: i32,
    pub week: u32,
    pub theme: String,
    pub restriction: String,
}

/// Extra fields carried by seasonal leagues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonDetails {
    pub season: Season,
    pub year: i32,
    pub divisions: Vec<Division>,
}

/// Tournament variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TournamentVariant {
    Standard,
    Weekly(WeeklyDetails),
    Seasonal(SeasonDetails),
}

/// Tournament configuration supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub name: String,
    pub description: String,
    pub format: TournamentFormat,
    /// Minimum participants required to start
    pub min_participants: usize,
    /// Capacity bound
    pub max_participants: usize,
    pub registration_deadline: DateTime<Utc>,
    /// Prize per finishing rank, first place first
    pub prizes: Vec<Prize>,
    pub rules: Vec<String>,
}

impl TournamentConfig {
    /// Create a single-elimination configuration
    pub fn single_elimination(
        name: impl Into<String>,
        max_participants: usize,
        registration_deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            format: TournamentFormat::SingleElimination,
            min_participants: 2,
            max_participants,
            registration_deadline,
            prizes: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Create a round-robin configuration
    pub fn round_robin(
        name: impl Into<String>,
        max_participants: usize,
        registration_deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            format: TournamentFormat::RoundRobin,
            ..Self::single_elimination(name, max_participants, registration_deadline)
        }
    }

    pub fn with_prizes(mut self, prizes: Vec<Prize>) -> Self {
        self.prizes = prizes;
        self
    }

    pub fn with_rules(mut self, rules: Vec<String>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Tournament record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub description: String,
    pub format: TournamentFormat,
    pub status: TournamentStatus,
    pub min_participants: usize,
    pub max_participants: usize,
    pub registration_deadline: DateTime<Utc>,
    /// Registration order
    pub participants: Vec<Participant>,
    pub rounds: Vec<Bracket>,
    pub prizes: Vec<Prize>,
    pub rules: Vec<String>,
    pub variant: TournamentVariant,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Build a fresh record in `Registration` status
    pub fn from_config(
        id: TournamentId,
        config: TournamentConfig,
        variant: TournamentVariant,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: config.name,
            description: config.description,
            format: config.format,
            status: TournamentStatus::Registration,
            min_participants: config.min_participants,
            max_participants: config.max_participants,
            registration_deadline: config.registration_deadline,
            participants: Vec::new(),
            rounds: Vec::new(),
            prizes: config.prizes,
            rules: config.rules,
            variant,
            created_at,
            started_at: None,
            completed_at: None,
            cancelled_at: None,
        }
    }

    pub fn participant(&self, trainer_id: &str) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.trainer_id == trainer_id)
    }

    pub fn participant_mut(&mut self, trainer_id: &str) -> Option<&mut Participant> {
        self.participants
            .iter_mut()
            .find(|p| p.trainer_id == trainer_id)
    }

    pub fn is_registered(&self, trainer_id: &str) -> bool {
        self.participant(trainer_id).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants
    }

    /// Participant ids in registration order
    pub fn participant_ids(&self) -> Vec<TrainerId> {
        self.participants
            .iter()
            .map(|p| p.trainer_id.clone())
            .collect()
    }

    pub fn find_match(&self, match_id: &str) -> Option<&Match> {
        self.rounds
            .iter()
            .flat_map(|b| b.matches.iter())
            .find(|m| m.id == match_id)
    }

    pub fn find_match_mut(&mut self, match_id: &str) -> Option<&mut Match> {
        self.rounds
            .iter_mut()
            .flat_map(|b| b.matches.iter_mut())
            .find(|m| m.id == match_id)
    }

    pub fn match_count(&self) -> usize {
        self.rounds.iter().map(|b| b.matches.len()).sum()
    }

    pub fn weekly_details(&self) -> Option<&WeeklyDetails> {
        match &self.variant {
            TournamentVariant::Weekly(details) => Some(details),
            _ => None,
        }
    }

    pub fn season_details(&self) -> Option<&SeasonDetails> {
        match &self.variant {
            TournamentVariant::Seasonal(details) => Some(details),
            _ => None,
        }
    }
}

/// Reported result for a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: TrainerId,
    pub score: Option<String>,
}

impl MatchResult {
    pub fn new(winner: impl Into<TrainerId>) -> Self {
        Self {
            winner: winner.into(),
            score: None,
        }
    }

    pub fn with_score(mut self, score: impl Into<String>) -> Self {
        self.score = Some(score.into());
        self
    }
}

/// Rating movement produced by one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub winner_before: i32,
    pub winner_after: i32,
    pub loser_before: i32,
    pub loser_after: i32,
}

/// What happened when a match result was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub tournament_id: TournamentId,
    pub match_id: MatchId,
    pub rating_change: RatingChange,
    /// Round generated as a consequence of this result
    pub next_round: Option<u32>,
    pub completed: bool,
    /// Prizes handed out when this result completed the tournament
    pub grants: Vec<PrizeGrant>,
}

/// Row of a standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-indexed
    pub rank: usize,
    pub trainer_id: TrainerId,
    pub wins: u32,
    pub losses: u32,
    pub eliminated: bool,
    pub rating: i32,
}
