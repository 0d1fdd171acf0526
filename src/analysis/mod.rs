//! Pure, synchronous insight generation over in-memory content history.
//!
//! Five generators feed the merged ranking: hashtags, content formats,
//! posting windows, and the two static sources (topics, seasonal). Each run
//! recomputes from the inputs it is handed; nothing is cached across calls.

pub mod content_type;
pub mod dashboard;
pub mod hashtags;
pub mod seasonal;
pub mod timing;
pub mod topics;

pub use dashboard::{generate_trend_analysis, generate_trend_analysis_at};
pub use hashtags::{FixedGrowth, GrowthEstimator, SampledGrowth};
pub use seasonal::StaticSeasonalSource;
pub use topics::StaticTopicSource;

use crate::types::{AccountSnapshot, ContentRecord, Platform, TrendInsight};
use chrono::{DateTime, Utc};

/// A provider of trend insights that are not derived from creator data.
///
/// The shipped implementations are static tables; a live trends feed can be
/// substituted here without touching the merge/rank logic.
pub trait TrendSource {
    fn emit(&self, content: &[ContentRecord], now: DateTime<Utc>) -> Vec<TrendInsight>;
}

const MAX_INSIGHTS: usize = 15;

/// Generate the ranked insight list for a creator.
///
/// Production entry point: samples hashtag growth and reads the wall clock.
/// Account snapshots are accepted for interface parity with the dashboard
/// path; insight scoring reads content history only.
pub fn generate_trend_predictions(
    content: &[ContentRecord],
    accounts: &[AccountSnapshot],
    platform: &Platform,
) -> Vec<TrendInsight> {
    generate_trend_predictions_at(content, accounts, platform, &SampledGrowth, Utc::now())
}

/// Deterministic variant: the caller supplies the growth estimator and clock.
pub fn generate_trend_predictions_at(
    content: &[ContentRecord],
    _accounts: &[AccountSnapshot],
    platform: &Platform,
    estimator: &dyn GrowthEstimator,
    now: DateTime<Utc>,
) -> Vec<TrendInsight> {
    let mut insights = hashtags::analyze(content, platform, estimator, now);
    insights.extend(content_type::analyze(content, now));
    insights.extend(timing::analyze(content, now));
    insights.extend(StaticTopicSource.emit(content, now));
    insights.extend(StaticSeasonalSource.emit(content, now));

    // Stable sort: ties keep generator insertion order
    // (hashtag, content type, posting time, topic, seasonal).
    insights.sort_by(|a, b| b.trend_score.cmp(&a.trend_score));
    insights.truncate(MAX_INSIGHTS);
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap()
    }

    fn record(categories: &[&str], likes: u64, views: u64, hour: u32) -> ContentRecord {
        ContentRecord {
            platform: Platform::Instagram,
            categories: categories.iter().map(|s| s.to_string()).collect(),
            likes,
            comments: 0,
            views,
            published_at: Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap(),
            title: "weekly reel".into(),
            description: String::new(),
            top_performer: false,
        }
    }

    fn busy_history() -> Vec<ContentRecord> {
        let mut content = Vec::new();
        for tag in ["beauty", "travel", "fitness", "food", "books"] {
            content.push(record(&[tag], 2_000, 20_000, 19));
            content.push(record(&[tag], 2_200, 22_000, 20));
        }
        content
    }

    #[test]
    fn merged_list_is_capped_and_sorted() {
        let insights = generate_trend_predictions_at(
            &busy_history(),
            &[],
            &Platform::Instagram,
            &FixedGrowth(10.0),
            now(),
        );

        assert!(insights.len() <= MAX_INSIGHTS);
        assert!(
            insights
                .windows(2)
                .all(|w| w[0].trend_score >= w[1].trend_score)
        );
    }

    #[test]
    fn every_insight_respects_clamps_and_the_volume_invariant() {
        let insights = generate_trend_predictions_at(
            &busy_history(),
            &[],
            &Platform::Instagram,
            &FixedGrowth(14.9),
            now(),
        );
        assert!(!insights.is_empty());
        for i in &insights {
            assert!(i.trend_score <= 100);
            assert!((0.0..=1.0).contains(&i.confidence));
            assert_eq!(
                i.predicted_volume,
                (i.current_volume as f64 * (1.0 + i.growth_rate / 100.0)).round() as u64,
                "volume invariant broken for {}",
                i.keyword
            );
        }
    }

    #[test]
    fn ties_keep_generator_order() {
        // Empty history: only static sources emit, all with preset scores.
        let insights = generate_trend_predictions_at(
            &[],
            &[],
            &Platform::Instagram,
            &FixedGrowth(0.0),
            now(),
        );
        let kinds: Vec<_> = insights
            .iter()
            .filter(|i| i.trend_score == insights[0].trend_score)
            .map(|i| i.kind)
            .collect();
        // Within one score bucket, topic entries precede seasonal ones.
        if kinds.len() > 1 {
            let first_seasonal = kinds.iter().position(|k| *k == crate::types::InsightKind::Seasonal);
            let last_topic = kinds.iter().rposition(|k| *k == crate::types::InsightKind::Topic);
            if let (Some(s), Some(t)) = (first_seasonal, last_topic) {
                assert!(t < s);
            }
        }
        assert!(!insights.is_empty());
    }

    #[test]
    fn empty_history_emits_only_static_sources() {
        let insights = generate_trend_predictions_at(
            &[],
            &[],
            &Platform::Instagram,
            &FixedGrowth(0.0),
            now(),
        );
        assert!(insights.iter().all(|i| matches!(
            i.kind,
            crate::types::InsightKind::Topic | crate::types::InsightKind::Seasonal
        )));
    }
}
