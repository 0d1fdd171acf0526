use crate::types::{ContentRecord, InsightKind, Timeframe, TrendInsight};
use chrono::{DateTime, Duration, Timelike, Utc};

const MIN_SLOT_ITEMS: usize = 3;

/// The four posting windows, by published hour (UTC).
const SLOTS: &[(&str, &str)] = &[
    ("Morning", "6-12"),
    ("Afternoon", "12-18"),
    ("Evening", "18-22"),
    ("Late Night", "22-6"),
];

fn slot_index(hour: u32) -> usize {
    match hour {
        6..=11 => 0,
        12..=17 => 1,
        18..=21 => 2,
        _ => 3,
    }
}

#[derive(Default, Clone, Copy)]
struct SlotStats {
    count: usize,
    total_engagement: u64,
    avg_views: f64,
}

fn bucket(content: &[ContentRecord]) -> [SlotStats; 4] {
    let mut slots = [SlotStats::default(); 4];
    for record in content {
        let s = &mut slots[slot_index(record.published_at.hour())];
        s.count += 1;
        s.total_engagement += record.engagement();
        s.avg_views += (record.views as f64 - s.avg_views) / s.count as f64;
    }
    slots
}

/// Labels of non-empty slots, best mean engagement first. Dashboard helper.
pub fn ranked_slot_labels(content: &[ContentRecord]) -> Vec<String> {
    let slots = bucket(content);
    let mut ranked: Vec<(usize, f64)> = slots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.count > 0)
        .map(|(i, s)| (i, s.total_engagement as f64 / s.count as f64))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .map(|(i, _)| format!("{} ({})", SLOTS[i].0, SLOTS[i].1))
        .collect()
}

/// Emit at most one insight: the posting window with the best mean
/// engagement, provided it holds at least three posts.
pub fn analyze(content: &[ContentRecord], now: DateTime<Utc>) -> Vec<TrendInsight> {
    let slots = bucket(content);

    let best = slots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.count > 0)
        .max_by(|(_, a), (_, b)| {
            let mean_a = a.total_engagement as f64 / a.count as f64;
            let mean_b = b.total_engagement as f64 / b.count as f64;
            mean_a.total_cmp(&mean_b)
        });

    let Some((index, stats)) = best else {
        return Vec::new();
    };
    if stats.count < MIN_SLOT_ITEMS {
        return Vec::new();
    }

    let (name, range) = SLOTS[index];
    let label = format!("{name} ({range})");
    let avg_engagement = stats.total_engagement as f64 / stats.count as f64;

    vec![TrendInsight::scored(
        InsightKind::PostingTime,
        label.clone(),
        stats.avg_views.round() as u64,
        15.0,
        (avg_engagement / 100.0).min(100.0),
        (stats.count as f64 / 10.0 + 0.4).min(0.85),
        Timeframe::Daily,
        now + Duration::days(1),
        format!("Schedule your next posts in the {label} window"),
        vec![
            format!("Queue tomorrow's post for the {name} window"),
            "Hold experimental formats for your best window".into(),
            "Compare weekday and weekend engagement within the window".into(),
        ],
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Platform;
    use chrono::TimeZone;

    fn record_at(hour: u32, likes: u64, views: u64) -> ContentRecord {
        ContentRecord {
            platform: Platform::Instagram,
            categories: vec![],
            likes,
            comments: 0,
            views,
            published_at: Utc.with_ymd_and_hms(2026, 3, 1, hour, 30, 0).unwrap(),
            title: String::new(),
            description: String::new(),
            top_performer: false,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn slot_boundaries() {
        assert_eq!(slot_index(6), 0);
        assert_eq!(slot_index(11), 0);
        assert_eq!(slot_index(12), 1);
        assert_eq!(slot_index(17), 1);
        assert_eq!(slot_index(18), 2);
        assert_eq!(slot_index(21), 2);
        assert_eq!(slot_index(22), 3);
        assert_eq!(slot_index(2), 3);
    }

    #[test]
    fn no_insight_when_every_slot_is_thin() {
        let content = vec![
            record_at(7, 100, 1_000),
            record_at(13, 200, 2_000),
            record_at(19, 300, 3_000),
            record_at(23, 400, 4_000),
        ];
        assert!(analyze(&content, now()).is_empty());
    }

    #[test]
    fn picks_the_highest_mean_engagement_slot() {
        let content = vec![
            record_at(19, 900, 10_000),
            record_at(20, 1_000, 12_000),
            record_at(21, 1_100, 14_000),
            record_at(8, 100, 5_000),
            record_at(9, 120, 5_000),
            record_at(10, 90, 5_000),
        ];
        let insights = analyze(&content, now());
        assert_eq!(insights.len(), 1);

        let insight = &insights[0];
        assert_eq!(insight.kind, InsightKind::PostingTime);
        assert_eq!(insight.keyword, "Evening (18-22)");
        // mean engagement 1000 -> score 10; 12_000 avg views, 15% uplift
        assert_eq!(insight.trend_score, 10);
        assert!((insight.growth_rate - 15.0).abs() < f64::EPSILON);
        assert_eq!(insight.current_volume, 12_000);
        assert_eq!(insight.predicted_volume, 13_800);
        assert!((insight.confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn late_night_wraps_midnight() {
        let content = vec![
            record_at(23, 500, 6_000),
            record_at(0, 600, 6_000),
            record_at(3, 700, 6_000),
        ];
        let insights = analyze(&content, now());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].keyword, "Late Night (22-6)");
    }

    #[test]
    fn empty_history_is_silent() {
        assert!(analyze(&[], now()).is_empty());
    }
}
