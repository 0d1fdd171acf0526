use super::TrendSource;
use crate::types::{ContentRecord, InsightKind, SeasonalPattern, Timeframe, TrendInsight};
use chrono::{DateTime, Datelike, Duration, Utc};

const BASE_VOLUME: u64 = 40_000;

/// Season entry: theme, demand multiplier over the base volume, preset score.
struct SeasonEntry {
    season: &'static str,
    theme: &'static str,
    multiplier: f64,
    score: f64,
}

const SEASONS: &[SeasonEntry] = &[
    SeasonEntry {
        season: "spring",
        theme: "spring cleaning",
        multiplier: 1.4,
        score: 66.0,
    },
    SeasonEntry {
        season: "summer",
        theme: "summer activities",
        multiplier: 1.5,
        score: 70.0,
    },
    SeasonEntry {
        season: "fall",
        theme: "back to school",
        multiplier: 1.35,
        score: 64.0,
    },
    SeasonEntry {
        season: "winter",
        theme: "holiday content",
        multiplier: 1.6,
        score: 78.0,
    },
];

fn season_index(month: u32) -> usize {
    match month {
        3..=5 => 0,
        6..=8 => 1,
        9..=11 => 2,
        _ => 3,
    }
}

/// Likelihood entries for the dashboard: the current season leads, the rest
/// trail in calendar order.
pub fn seasonal_patterns(now: DateTime<Utc>) -> Vec<SeasonalPattern> {
    let current = season_index(now.month());
    SEASONS
        .iter()
        .enumerate()
        .map(|(i, entry)| SeasonalPattern {
            season: entry.season.to_string(),
            theme: entry.theme.to_string(),
            likelihood: if i == current { 0.85 } else { 0.45 },
        })
        .collect()
}

/// Calendar-driven seasonal predictions.
///
/// Not derived from creator data: a fixed multiplier over a fixed base
/// volume, selected by the current month. A pluggable stand-in until a real
/// seasonal demand feed exists.
pub struct StaticSeasonalSource;

impl TrendSource for StaticSeasonalSource {
    fn emit(&self, _content: &[ContentRecord], now: DateTime<Utc>) -> Vec<TrendInsight> {
        let entry = &SEASONS[season_index(now.month())];
        let growth = (entry.multiplier - 1.0) * 100.0;

        vec![TrendInsight::scored(
            InsightKind::Seasonal,
            entry.theme,
            BASE_VOLUME,
            growth,
            entry.score,
            0.7,
            Timeframe::Monthly,
            now + Duration::days(30),
            format!("Prepare {} posts before demand peaks", entry.theme),
            vec![
                format!("Draft a {} series for the coming weeks", entry.theme),
                format!("Refresh last year's best {} post", entry.theme),
                format!("Pitch {} collaborations to brand partners", entry.theme),
            ],
        )]
    }
}
