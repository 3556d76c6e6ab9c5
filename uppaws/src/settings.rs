//! Engine tunables loaded from the environment.

use crate::rating::{DEFAULT_K_FACTOR, DEFAULT_MATCHMAKING_WINDOW, DEFAULT_RATING};

/// Tournament engine settings
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentSettings {
    /// Elo adjustment factor
    pub k_factor: f64,
    /// Rating for trainers that have never played
    pub default_rating: i32,
    /// Half-width of the matchmaking rating window
    pub matchmaking_window: i32,
    /// Capacity of generated weekly tournaments
    pub weekly_capacity: usize,
    /// Registration window of weekly tournaments, in hours
    pub weekly_registration_hours: i64,
    /// Capacity of generated seasonal leagues
    pub seasonal_capacity: usize,
    /// Registration window of seasonal leagues, in days
    pub seasonal_registration_days: i64,
}

impl TournamentSettings {
    /// Load settings from environment variables
    ///
    /// Environment variables:
    /// - `UPPAWS_K_FACTOR` (default: 32)
    /// - `UPPAWS_DEFAULT_RATING` (default: 1000)
    /// - `UPPAWS_MATCHMAKING_WINDOW` (default: 100)
    /// - `UPPAWS_WEEKLY_CAPACITY` (default: 32)
    /// - `UPPAWS_WEEKLY_REGISTRATION_HOURS` (default: 72)
    /// - `UPPAWS_SEASONAL_CAPACITY` (default: 64)
    /// - `UPPAWS_SEASONAL_REGISTRATION_DAYS` (default: 14)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            k_factor: parse_env_or("UPPAWS_K_FACTOR", defaults.k_factor),
            default_rating: parse_env_or("UPPAWS_DEFAULT_RATING", defaults.default_rating),
            matchmaking_window: parse_env_or(
                "UPPAWS_MATCHMAKING_WINDOW",
                defaults.matchmaking_window,
            ),
            weekly_capacity: parse_env_or("UPPAWS_WEEKLY_CAPACITY", defaults.weekly_capacity),
            weekly_registration_hours: parse_env_or(
                "UPPAWS_WEEKLY_REGISTRATION_HOURS",
                defaults.weekly_registration_hours,
            ),
            seasonal_capacity: parse_env_or(
                "UPPAWS_SEASONAL_CAPACITY",
                defaults.seasonal_capacity,
            ),
            seasonal_registration_days: parse_env_or(
                "UPPAWS_SEASONAL_REGISTRATION_DAYS",
                defaults.seasonal_registration_days,
            ),
        }
    }
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            default_rating: DEFAULT_RATING,
            matchmaking_window: DEFAULT_MATCHMAKING_WINDOW,
            weekly_capacity: 32,
            weekly_registration_hours: 72,
            seasonal_capacity: 64,
            seasonal_registration_days: 14,
        }
    }
}

/// Parse an environment variable, falling back to `default`
pub fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
