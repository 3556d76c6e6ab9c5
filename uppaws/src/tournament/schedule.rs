//! Recurring tournament templates: weekly cups and seasonal leagues.
//!
//! Everything here is deterministic in the calendar date. Theme and
//! restriction rotate with the week number rather than being drawn at random.

use super::models::{
    Division, Prize, Season, SeasonDetails, TournamentConfig, TournamentFormat, TournamentId,
    WeeklyDetails,
};
use crate::settings::TournamentSettings;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Weekly themes, indexed by `week % len`
pub const WEEKLY_THEMES: [&str; 8] = [
    "Ocean Depths",
    "Savanna Sprint",
    "Arctic Expedition",
    "Rainforest Rumble",
    "Desert Mirage",
    "Mountain Peak",
    "Night Prowlers",
    "Island Hop",
];

/// Weekly team restrictions, indexed by `week % len`
pub const WEEKLY_RESTRICTIONS: [&str; 5] = [
    "none",
    "common_only",
    "no_legendaries",
    "single_habitat",
    "max_level_25",
];

/// Week number with weeks starting on Sunday:
/// `ceil((day_of_year0 + jan1_weekday + 1) / 7)`.
pub fn week_number(date: NaiveDate) -> u32 {
    let ordinal0 = date.ordinal0();
    // Weekday of January 1st, Sunday = 0
    let jan1 = (date.weekday().num_days_from_sunday() + 7 - ordinal0 % 7) % 7;
    (ordinal0 + jan1 + 7) / 7
}

pub fn weekly_tournament_id(year: i32, week: u32) -> TournamentId {
    format!("weekly_{year}_{week}")
}

pub fn seasonal_league_id(season: Season, year: i32) -> TournamentId {
    format!("season_{season}_{year}")
}

pub fn weekly_theme(week: u32) -> &'static str {
    WEEKLY_THEMES[week as usize % WEEKLY_THEMES.len()]
}

pub fn weekly_restriction(week: u32) -> &'static str {
    WEEKLY_RESTRICTIONS[week as usize % WEEKLY_RESTRICTIONS.len()]
}

/// Week details for the week containing `now`
pub fn weekly_details(now: DateTime<Utc>) -> WeeklyDetails {
    let date = now.date_naive();
    let week = week_number(date);
    WeeklyDetails {
        year: date.year(),
        week,
        theme: weekly_theme(week).to_string(),
        restriction: weekly_restriction(week).to_string(),
    }
}

/// Configuration for the weekly cup described by `details`
pub fn weekly_config(
    details: &WeeklyDetails,
    now: DateTime<Utc>,
    settings: &TournamentSettings,
) -> TournamentConfig {
    TournamentConfig::single_elimination(
        format!("Weekly Cup #{}: {}", details.week, details.theme),
        settings.weekly_capacity,
        now + Duration::hours(settings.weekly_registration_hours),
    )
    .with_description(format!(
        "Week {} of {}. Restriction: {}",
        details.week, details.year, details.restriction
    ))
    .with_prizes(Prize::weekly_pool())
    .with_rules(vec![
        "Single elimination, registration order pairing".to_string(),
        format!("Team restriction: {}", details.restriction),
    ])
}

/// Fixed four-division template, top tier first
pub fn division_template() -> Vec<Division> {
    [
        ("Premier", 1, 0, 3),
        ("Championship", 2, 3, 3),
        ("League One", 3, 3, 3),
        ("League Two", 4, 3, 0),
    ]
    .into_iter()
    .map(|(name, tier, promotion_slots, relegation_slots)| Division {
        name: name.to_string(),
        tier,
        promotion_slots,
        relegation_slots,
        members: Vec::new(),
    })
    .collect()
}

/// Details for a fresh league; divisions start without members
pub fn season_details(season: Season, year: i32) -> SeasonDetails {
    SeasonDetails {
        season,
        year,
        divisions: division_template(),
    }
}

/// Configuration for a seasonal league
pub fn seasonal_config(
    season: Season,
    year: i32,
    now: DateTime<Utc>,
    settings: &TournamentSettings,
) -> TournamentConfig {
    TournamentConfig {
        name: format!("{} League {}", capitalize(&season.to_string()), year),
        description: format!("Seasonal league for {season} {year}"),
        format: TournamentFormat::RoundRobin,
        min_participants: 2,
        max_participants: settings.seasonal_capacity,
        registration_deadline: now + Duration::days(settings.seasonal_registration_days),
        prizes: Prize::seasonal_pool(),
        rules: vec![
            "Round robin within the league".to_string(),
            "Promotion and relegation apply at season end".to_string(),
        ],
    }
}

impl Season {
    /// Meteorological season of a month (1-12)
    pub fn for_month(month: u32) -> Season {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_days_are_week_one() {
        // 2026-01-01 is a Thursday; the first Sunday starts week 2
        assert_eq!(week_number(date(2026, 1, 1)), 1);
        assert_eq!(week_number(date(2026, 1, 3)), 1);
        assert_eq!(week_number(date(2026, 1, 4)), 2);
    }

    #[test]
    fn test_weeks_start_on_sunday() {
        assert_eq!(week_number(date(2026, 10, 17)), 42);
        assert_eq!(week_number(date(2026, 10, 18)), 43);
        assert_eq!(week_number(date(2026, 10, 24)), 43);
        assert_eq!(week_number(date(2026, 10, 25)), 44);
    }

    #[test]
    fn test_year_starting_on_sunday() {
        // 2023-01-01 is a Sunday
        assert_eq!(week_number(date(2023, 1, 1)), 1);
        assert_eq!(week_number(date(2023, 1, 7)), 1);
        assert_eq!(week_number(date(2023, 1, 8)), 2);
    }

    #[test]
    fn test_theme_and_restriction_rotate() {
        assert_eq!(weekly_theme(43), "Rainforest Rumble");
        assert_eq!(weekly_restriction(43), "single_habitat");
        assert_eq!(weekly_theme(0), weekly_theme(8));
        assert_eq!(weekly_restriction(2), weekly_restriction(7));
    }

    #[test]
    fn test_weekly_details_for_instant() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let details = weekly_details(now);
        assert_eq!(details.year, 2026);
        assert_eq!(details.week, 43);
        assert_eq!(weekly_tournament_id(details.year, details.week), "weekly_2026_43");
    }

    #[test]
    fn test_weekly_config_uses_settings() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
        let settings = TournamentSettings::default();
        let config = weekly_config(&weekly_details(now), now, &settings);
        assert_eq!(config.format, TournamentFormat::SingleElimination);
        assert_eq!(config.max_participants, settings.weekly_capacity);
        assert_eq!(config.registration_deadline, now + Duration::hours(72));
        assert_eq!(config.prizes.len(), 3);
    }

    #[test]
    fn test_division_template() {
        let divisions = division_template();
        let names: Vec<&str> = divisions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Premier", "Championship", "League One", "League Two"]
        );
        assert_eq!(divisions[0].promotion_slots, 0);
        assert_eq!(divisions[3].relegation_slots, 0);
        assert!(divisions.iter().all(|d| d.members.is_empty()));
    }

    #[test]
    fn test_seasonal_ids_and_names() {
        assert_eq!(seasonal_league_id(Season::Autumn, 2026), "season_autumn_2026");
        let config = seasonal_config(
            Season::Autumn,
            2026,
            Utc::now(),
            &TournamentSettings::default(),
        );
        assert_eq!(config.name, "Autumn League 2026");
        assert_eq!(config.format, TournamentFormat::RoundRobin);
    }

    #[test]
    fn test_season_for_month() {
        assert_eq!(Season::for_month(1), Season::Winter);
        assert_eq!(Season::for_month(4), Season::Spring);
        assert_eq!(Season::for_month(7), Season::Summer);
        assert_eq!(Season::for_month(10), Season::Autumn);
        assert_eq!(Season::for_month(12), Season::Winter);
    }
}
