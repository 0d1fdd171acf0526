use crate::types::{ContentRecord, InsightKind, Platform, Timeframe, TrendInsight};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

const MIN_USES: usize = 2;
const MIN_SCORE: u8 = 30;

/// Source of the base growth-rate component for a hashtag, in [-5, +15).
///
/// The heuristic has no real growth signal yet, so the estimate is a
/// pluggable strategy: production samples uniformly, tests pin a fixed
/// value, and a future historical-growth calculation can slot in without
/// touching the scoring.
pub trait GrowthEstimator {
    fn estimate(&self, hashtag: &str) -> f64;
}

/// Production estimator: uniform sample in [-5, +15).
pub struct SampledGrowth;

impl GrowthEstimator for SampledGrowth {
    fn estimate(&self, _hashtag: &str) -> f64 {
        rand::random_range(-5.0..15.0)
    }
}

/// Deterministic estimator for tests and reproducible runs.
pub struct FixedGrowth(pub f64);

impl GrowthEstimator for FixedGrowth {
    fn estimate(&self, _hashtag: &str) -> f64 {
        self.0
    }
}

#[derive(Default)]
struct TagStats {
    uses: usize,
    total_engagement: u64,
    avg_views: f64,
}

/// Lowercase, spaces stripped, `#`-prefixed.
pub fn normalize_hashtag(category: &str) -> String {
    let tag: String = category
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    format!("#{}", tag.trim_start_matches('#'))
}

/// Score every content category used at least twice as a hashtag trend.
pub fn analyze(
    content: &[ContentRecord],
    platform: &Platform,
    estimator: &dyn GrowthEstimator,
    now: DateTime<Utc>,
) -> Vec<TrendInsight> {
    let mut order: Vec<String> = Vec::new();
    let mut stats: HashMap<String, TagStats> = HashMap::new();

    for record in content {
        for category in &record.categories {
            let tag = normalize_hashtag(category);
            let entry = stats.entry(tag.clone()).or_insert_with(|| {
                order.push(tag);
                TagStats::default()
            });
            entry.uses += 1;
            entry.total_engagement += record.engagement();
            // Running average keeps the accumulator small for long histories.
            entry.avg_views += (record.views as f64 - entry.avg_views) / entry.uses as f64;
        }
    }

    order
        .into_iter()
        .filter_map(|tag| {
            let s = &stats[&tag];
            if s.uses < MIN_USES {
                return None;
            }

            let base = estimator.estimate(&tag);
            let popularity_bonus = (s.avg_views / 10_000.0).min(10.0);
            let growth_rate = round2(base + popularity_bonus);

            let avg_engagement = s.total_engagement as f64 / s.uses as f64;
            let raw_score = (avg_engagement / 1_000.0) * 50.0 + growth_rate * 2.0;
            let trend_score = raw_score.clamp(0.0, 100.0).round() as u8;

            let insight = TrendInsight::scored(
                InsightKind::Hashtag,
                tag.clone(),
                s.avg_views.round() as u64,
                growth_rate,
                raw_score,
                (s.uses as f64 / 10.0 + 0.5).min(0.95),
                Timeframe::Weekly,
                now + Duration::days(7),
                if trend_score > 70 {
                    format!("Increase usage of {tag}: engagement is trending upward")
                } else {
                    format!("Monitor {tag}: moderate growth expected")
                },
                vec![
                    format!("Pair {tag} with a behind-the-scenes post on {platform}"),
                    format!("Run a short series themed around {tag}"),
                    format!("Cross-post your best {tag} content to stories"),
                ],
            );

            (insight.trend_score > MIN_SCORE).then_some(insight)
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
