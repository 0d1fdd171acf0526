use crate::types::{
    ContentRecord, ContentTypeTrend, InsightKind, Platform, Timeframe, TrendDirection,
    TrendInsight,
};
use chrono::{DateTime, Duration, Utc};

const MIN_SCORE: u8 = 25;

const FORMATS: &[&str] = &["video", "image", "carousel", "story", "reel"];

/// Assumed weekly growth per format. 10 for formats outside the table.
fn table_growth(format: &str) -> f64 {
    match format {
        "video" => 12.0,
        "reel" => 25.0,
        "story" => 8.0,
        "image" => 5.0,
        "carousel" => 15.0,
        _ => 10.0,
    }
}

fn matches_format(record: &ContentRecord, format: &str) -> bool {
    let text = format!(
        "{} {}",
        record.title.to_lowercase(),
        record.description.to_lowercase()
    );
    if text.contains(format) {
        return true;
    }
    // Platform implies a native format even when the text never names it.
    matches!(
        (&record.platform, format),
        (Platform::Youtube, "video") | (Platform::Instagram, "reel")
    )
}

/// Per-format mean engagement with a direction read off the growth table.
/// Dashboard helper.
pub fn performance(content: &[ContentRecord]) -> Vec<ContentTypeTrend> {
    FORMATS
        .iter()
        .filter_map(|&format| {
            let matched: Vec<&ContentRecord> = content
                .iter()
                .filter(|r| matches_format(r, format))
                .collect();
            if matched.is_empty() {
                return None;
            }
            let avg_engagement = matched.iter().map(|r| r.engagement() as f64).sum::<f64>()
                / matched.len() as f64;
            let growth = table_growth(format);
            Some(ContentTypeTrend {
                content_type: format.to_string(),
                avg_engagement,
                direction: if growth >= 15.0 {
                    TrendDirection::Rising
                } else if growth >= 8.0 {
                    TrendDirection::Steady
                } else {
                    TrendDirection::Declining
                },
            })
        })
        .collect()
}

/// Score each content format by its engagement density (engagement/views).
pub fn analyze(content: &[ContentRecord], now: DateTime<Utc>) -> Vec<TrendInsight> {
    FORMATS
        .iter()
        .filter_map(|&format| {
            let matched: Vec<&ContentRecord> = content
                .iter()
                .filter(|r| matches_format(r, format))
                .collect();
            if matched.is_empty() {
                return None;
            }

            let count = matched.len() as f64;
            let avg_engagement =
                matched.iter().map(|r| r.engagement() as f64).sum::<f64>() / count;
            let avg_views = matched.iter().map(|r| r.views as f64).sum::<f64>() / count;
            if avg_views == 0.0 {
                return None;
            }

            let growth_rate = table_growth(format);
            let raw_score = ((avg_engagement / avg_views) * 100.0 * 50.0).min(100.0);

            let insight = TrendInsight::scored(
                InsightKind::ContentType,
                format,
                avg_views.round() as u64,
                growth_rate,
                raw_score,
                (count / 20.0 + 0.6).min(0.9),
                Timeframe::Weekly,
                now + Duration::days(7),
                format!("Lean into {format} posts: the format is outperforming your average"),
                vec![
                    format!("Repurpose a top post into {format} form"),
                    format!("Test two {format} uploads this week and compare reach"),
                    format!("Keep {format} openings under three seconds"),
                ],
            );

            (insight.trend_score > MIN_SCORE).then_some(insight)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(
        platform: Platform,
        title: &str,
        likes: u64,
        comments: u64,
        views: u64,
    ) -> ContentRecord {
        ContentRecord {
            platform,
            categories: vec![],
            likes,
            comments,
            views,
            published_at: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
            title: title.into(),
            description: String::new(),
            top_performer: false,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn youtube_platform_implies_video() {
        let content = vec![record(Platform::Youtube, "untitled upload", 800, 100, 50_000)];
        let insights = analyze(&content, now());
        assert!(insights.iter().any(|i| i.keyword == "video"));
    }

    #[test]
    fn instagram_platform_implies_reel() {
        let content = vec![record(Platform::Instagram, "morning routine", 900, 50, 40_000)];
        let insights = analyze(&content, now());
        let reel = insights.iter().find(|i| i.keyword == "reel").unwrap();
        assert!((reel.growth_rate - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn text_mention_matches_format() {
        let content = vec![record(
            Platform::Other("twitch".into()),
            "new carousel recap",
            400,
            40,
            8_000,
        )];
        let insights = analyze(&content, now());
        assert!(insights.iter().any(|i| i.keyword == "carousel"));
    }

    #[test]
    fn zero_views_drops_the_format() {
        let content = vec![record(Platform::Youtube, "video short", 100, 10, 0)];
        let insights = analyze(&content, now());
        assert!(insights.is_empty());
    }

    #[test]
    fn weak_density_stays_below_threshold() {
        // 30 engagement over 50_000 views: (0.0006)*5000 = 3 -> dropped
        let content = vec![record(Platform::Youtube, "long video", 25, 5, 50_000)];
        let insights = analyze(&content, now());
        assert!(insights.is_empty());
    }

    #[test]
    fn density_score_is_capped_at_100() {
        // 5_000 engagement over 10_000 views: 0.5 * 5000 = 2500 -> capped
        let content = vec![record(Platform::Youtube, "clip video", 4_000, 1_000, 10_000)];
        let insights = analyze(&content, now());
        let video = insights.iter().find(|i| i.keyword == "video").unwrap();
        assert_eq!(video.trend_score, 100);
        assert!((video.confidence - 0.65).abs() < 1e-9);
    }

    #[test]
    fn volume_invariant_holds() {
        let content = vec![record(Platform::Instagram, "reel", 2_000, 100, 30_000)];
        let insights = analyze(&content, now());
        for i in &insights {
            assert_eq!(
                i.predicted_volume,
                (i.current_volume as f64 * (1.0 + i.growth_rate / 100.0)).round() as u64
            );
        }
    }
}
