//! Simulator configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use uppaws::{
    settings::{TournamentSettings, parse_env_or},
    tournament::TournamentFormat,
};

/// Largest field the simulator will run
pub const MAX_PARTICIPANTS: usize = 1024;

/// Complete simulator configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated trainers
    pub participants: usize,
    /// Format of the simulated tournament
    pub format: TournamentFormat,
    /// RNG seed for match outcomes
    pub seed: u64,
    /// Run this week's cup instead of an ad-hoc tournament
    pub weekly: bool,
    /// Engine tunables
    pub settings: TournamentSettings,
}

/// Values given on the command line, taking priority over the environment
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub participants: Option<usize>,
    pub format: Option<String>,
    pub seed: Option<u64>,
    pub weekly: bool,
}

impl SimConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `SIM_PARTICIPANTS` (default: 8)
    /// - `SIM_FORMAT` (`single` or `round-robin`, default: `single`)
    /// - `SIM_SEED` (default: random)
    /// - `UPPAWS_*` engine settings, see [`TournamentSettings::from_env`]
    ///
    /// # Errors
    ///
    /// Returns error if the format is not recognised
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let participants = overrides
            .participants
            .unwrap_or_else(|| parse_env_or("SIM_PARTICIPANTS", 8));

        let format = match overrides
            .format
            .or_else(|| std::env::var("SIM_FORMAT").ok())
        {
            Some(raw) => parse_format(&raw)?,
            None => TournamentFormat::SingleElimination,
        };

        let seed = overrides
            .seed
            .or_else(|| std::env::var("SIM_SEED").ok().and_then(|v| v.parse().ok()))
            .unwrap_or_else(rand::random);

        Ok(SimConfig {
            participants,
            format,
            seed,
            weekly: overrides.weekly,
            settings: TournamentSettings::from_env(),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.participants < 2 {
            return Err(ConfigError::Invalid {
                var: "SIM_PARTICIPANTS".to_string(),
                reason: "Must be at least 2".to_string(),
            });
        }

        if self.participants > MAX_PARTICIPANTS {
            return Err(ConfigError::Invalid {
                var: "SIM_PARTICIPANTS".to_string(),
                reason: format!("Must be at most {MAX_PARTICIPANTS}"),
            });
        }

        if self.weekly && self.participants > self.settings.weekly_capacity {
            return Err(ConfigError::Invalid {
                var: "SIM_PARTICIPANTS".to_string(),
                reason: format!(
                    "Cannot exceed weekly capacity ({})",
                    self.settings.weekly_capacity
                ),
            });
        }

        if self.weekly && self.format != TournamentFormat::SingleElimination {
            return Err(ConfigError::Invalid {
                var: "SIM_FORMAT".to_string(),
                reason: "Weekly cups are single elimination".to_string(),
            });
        }

        if self.settings.k_factor.is_nan() || self.settings.k_factor <= 0.0 {
            return Err(ConfigError::Invalid {
                var: "UPPAWS_K_FACTOR".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown tournament format: {0} (expected single or round-robin)")]
    UnknownFormat(String),

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse a format name as accepted on the command line
pub fn parse_format(raw: &str) -> Result<TournamentFormat, ConfigError> {
    match raw.to_lowercase().as_str() {
        "single" | "single-elimination" | "single_elimination" => {
            Ok(TournamentFormat::SingleElimination)
        }
        "round-robin" | "round_robin" | "rr" => Ok(TournamentFormat::RoundRobin),
        _ => Err(ConfigError::UnknownFormat(raw.to_string())),
    }
}
