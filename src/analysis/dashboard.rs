use super::{content_type, hashtags, seasonal, timing, topics};
use crate::types::{
    AccountSnapshot, ContentRecord, HashtagStat, Platform, TrendAnalysisResult, TrendPoint,
};
use chrono::{DateTime, Datelike, Utc};
use std::collections::HashMap;

const TOP_HASHTAGS: usize = 5;
const TOP_POST_TIMES: usize = 3;
const TREND_MONTHS: usize = 6;
const VIRAL_CANDIDATES: usize = 3;

/// Build the dashboard aggregate from one creator's history.
pub fn generate_trend_analysis(
    content: &[ContentRecord],
    accounts: &[AccountSnapshot],
    platform: &Platform,
) -> TrendAnalysisResult {
    generate_trend_analysis_at(content, accounts, platform, Utc::now())
}

/// Deterministic variant: the caller supplies the clock.
pub fn generate_trend_analysis_at(
    content: &[ContentRecord],
    accounts: &[AccountSnapshot],
    _platform: &Platform,
    now: DateTime<Utc>,
) -> TrendAnalysisResult {
    TrendAnalysisResult {
        top_hashtags: top_hashtags(content),
        emerging_topics: topics::emerging_topic_names(),
        optimal_post_times: {
            let mut labels = timing::ranked_slot_labels(content);
            labels.truncate(TOP_POST_TIMES);
            labels
        },
        content_type_performance: content_type::performance(content),
        audience_growth: audience_growth(accounts),
        engagement_trend: engagement_trend(content),
        competitor_insights: competitor_insights(),
        seasonal_patterns: seasonal::seasonal_patterns(now),
        viral_candidates: viral_candidates(content),
    }
}

fn top_hashtags(content: &[ContentRecord]) -> Vec<HashtagStat> {
    let mut order: Vec<String> = Vec::new();
    let mut tally: HashMap<String, (usize, u64)> = HashMap::new();

    for record in content {
        for category in &record.categories {
            let tag = hashtags::normalize_hashtag(category);
            let entry = tally.entry(tag.clone()).or_insert_with(|| {
                order.push(tag);
                (0, 0)
            });
            entry.0 += 1;
            entry.1 += record.engagement();
        }
    }

    let mut stats: Vec<HashtagStat> = order
        .into_iter()
        .map(|tag| {
            let (uses, total_engagement) = tally[&tag];
            HashtagStat {
                hashtag: tag,
                uses,
                total_engagement,
            }
        })
        .collect();
    stats.sort_by(|a, b| {
        b.total_engagement
            .cmp(&a.total_engagement)
            .then(b.uses.cmp(&a.uses))
    });
    stats.truncate(TOP_HASHTAGS);
    stats
}

/// Current followers plus a next-month projection per account. With single
/// snapshots there is no real history; the engagement rate stands in as the
/// growth proxy.
fn audience_growth(accounts: &[AccountSnapshot]) -> Vec<TrendPoint> {
    accounts
        .iter()
        .flat_map(|account| {
            let projected =
                account.followers as f64 * (1.0 + account.engagement_rate / 100.0);
            [
                TrendPoint {
                    label: format!("{} now", account.platform),
                    value: account.followers as f64,
                },
                TrendPoint {
                    label: format!("{} next month", account.platform),
                    value: projected.round(),
                },
            ]
        })
        .collect()
}

fn engagement_trend(content: &[ContentRecord]) -> Vec<TrendPoint> {
    let mut by_month: HashMap<String, (u64, usize)> = HashMap::new();
    for record in content {
        let label = format!(
            "{:04}-{:02}",
            record.published_at.year(),
            record.published_at.month()
        );
        let entry = by_month.entry(label).or_insert((0, 0));
        entry.0 += record.engagement();
        entry.1 += 1;
    }

    let mut points: Vec<TrendPoint> = by_month
        .into_iter()
        .map(|(label, (total, count))| TrendPoint {
            label,
            value: total as f64 / count as f64,
        })
        .collect();
    points.sort_by(|a, b| a.label.cmp(&b.label));
    if points.len() > TREND_MONTHS {
        points.drain(..points.len() - TREND_MONTHS);
    }
    points
}

/// Editorial strings until competitor tracking lands.
fn competitor_insights() -> Vec<String> {
    vec![
        "Creators in your niche post 20% more short-form video than last quarter".into(),
        "Carousel posts are closing the engagement gap with reels".into(),
        "Cross-platform posting within one hour of publish lifts reach".into(),
    ]
}

fn viral_candidates(content: &[ContentRecord]) -> Vec<String> {
    let mut ranked: Vec<&ContentRecord> = content.iter().filter(|r| !r.title.is_empty()).collect();
    // Flagged top performers first, then raw view count.
    ranked.sort_by(|a, b| {
        b.top_performer
            .cmp(&a.top_performer)
            .then(b.views.cmp(&a.views))
    });
    ranked
        .into_iter()
        .take(VIRAL_CANDIDATES)
        .map(|r| r.title.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(
        categories: &[&str],
        title: &str,
        likes: u64,
        views: u64,
        month: u32,
        top: bool,
    ) -> ContentRecord {
        ContentRecord {
            platform: Platform::Instagram,
            categories: categories.iter().map(|s| s.to_string()).collect(),
            likes,
            comments: 0,
            views,
            published_at: Utc.with_ymd_and_hms(2026, month, 5, 19, 0, 0).unwrap(),
            title: title.into(),
            description: String::new(),
            top_performer: top,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn top_hashtags_rank_by_engagement() {
        let content = vec![
            record(&["beauty"], "a", 500, 1_000, 1, false),
            record(&["beauty"], "b", 700, 1_000, 2, false),
            record(&["travel"], "c", 100, 1_000, 2, false),
        ];
        let result = generate_trend_analysis_at(&content, &[], &Platform::Instagram, now());
        assert_eq!(result.top_hashtags[0].hashtag, "#beauty");
        assert_eq!(result.top_hashtags[0].uses, 2);
        assert_eq!(result.top_hashtags[0].total_engagement, 1_200);
    }

    #[test]
    fn audience_growth_projects_per_account() {
        let accounts = vec![AccountSnapshot {
            platform: Platform::Tiktok,
            followers: 10_000,
            engagement_rate: 5.0,
        }];
        let result = generate_trend_analysis_at(&[], &accounts, &Platform::Tiktok, now());
        assert_eq!(result.audience_growth.len(), 2);
        assert_eq!(result.audience_growth[0].value, 10_000.0);
        assert_eq!(result.audience_growth[1].value, 10_500.0);
    }

    #[test]
    fn engagement_trend_is_month_ordered() {
        let content = vec![
            record(&[], "mar", 300, 1_000, 3, false),
            record(&[], "jan", 100, 1_000, 1, false),
            record(&[], "feb", 200, 1_000, 2, false),
        ];
        let result = generate_trend_analysis_at(&content, &[], &Platform::Instagram, now());
        let labels: Vec<&str> = result
            .engagement_trend
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, vec!["2026-01", "2026-02", "2026-03"]);
    }

    #[test]
    fn viral_candidates_prefer_flagged_top_performers() {
        let content = vec![
            record(&[], "quiet post", 10, 900_000, 1, false),
            record(&[], "flagged post", 10, 1_000, 1, true),
        ];
        let result = generate_trend_analysis_at(&content, &[], &Platform::Instagram, now());
        assert_eq!(result.viral_candidates[0], "flagged post");
    }

    #[test]
    fn empty_history_still_produces_static_sections() {
        let result = generate_trend_analysis_at(&[], &[], &Platform::Instagram, now());
        assert!(result.top_hashtags.is_empty());
        assert!(result.optimal_post_times.is_empty());
        assert!(!result.emerging_topics.is_empty());
        assert!(!result.competitor_insights.is_empty());
        assert_eq!(result.seasonal_patterns.len(), 4);
    }
}
