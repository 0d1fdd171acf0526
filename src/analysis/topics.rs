use super::TrendSource;
use crate::types::{ContentRecord, InsightKind, Timeframe, TrendInsight};
use chrono::{DateTime, Duration, Utc};

/// Preset industry topic. Volumes, growth, and score are editorial
/// assumptions, not derived from creator data.
struct TopicEntry {
    keyword: &'static str,
    volume: u64,
    growth: f64,
    score: f64,
}

const TOPICS: &[TopicEntry] = &[
    TopicEntry {
        keyword: "sustainability",
        volume: 45_000,
        growth: 18.0,
        score: 72.0,
    },
    TopicEntry {
        keyword: "mental health",
        volume: 38_000,
        growth: 22.0,
        score: 75.0,
    },
    TopicEntry {
        keyword: "ai tools",
        volume: 52_000,
        growth: 31.0,
        score: 81.0,
    },
    TopicEntry {
        keyword: "home workouts",
        volume: 27_000,
        growth: 12.0,
        score: 58.0,
    },
    TopicEntry {
        keyword: "budget travel",
        volume: 31_000,
        growth: 15.0,
        score: 63.0,
    },
];

/// Names of the preset topics, highest growth first. Dashboard helper.
pub fn emerging_topic_names() -> Vec<String> {
    let mut entries: Vec<&TopicEntry> = TOPICS.iter().collect();
    entries.sort_by(|a, b| b.growth.total_cmp(&a.growth));
    entries.iter().map(|t| t.keyword.to_string()).collect()
}

/// Static industry-topic predictions.
///
/// Only confidence reacts to the creator's data: 0.8 when their content
/// already touches the topic, 0.6 otherwise. Everything else is table-driven
/// until a live trends feed replaces this source.
pub struct StaticTopicSource;

fn content_mentions(content: &[ContentRecord], keyword: &str) -> bool {
    content.iter().any(|r| {
        r.title.to_lowercase().contains(keyword)
            || r.description.to_lowercase().contains(keyword)
            || r.categories.iter().any(|c| c.to_lowercase().contains(keyword))
    })
}

impl TrendSource for StaticTopicSource {
    fn emit(&self, content: &[ContentRecord], now: DateTime<Utc>) -> Vec<TrendInsight> {
        TOPICS
            .iter()
            .map(|topic| {
                let familiar = content_mentions(content, topic.keyword);
                TrendInsight::scored(
                    InsightKind::Topic,
                    topic.keyword,
                    topic.volume,
                    topic.growth,
                    topic.score,
                    if familiar { 0.8 } else { 0.6 },
                    Timeframe::Monthly,
                    now + Duration::days(30),
                    format!("Plan a content angle around {}", topic.keyword),
                    vec![
                        format!("Share your take on {} with your audience", topic.keyword),
                        format!("Collaborate with a creator in the {} space", topic.keyword),
                        format!("Answer follower questions about {}", topic.keyword),
                    ],
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Platform;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap()
    }

    fn record_about(title: &str) -> ContentRecord {
        ContentRecord {
            platform: Platform::Instagram,
            categories: vec![],
            likes: 10,
            comments: 1,
            views: 100,
            published_at: now(),
            title: title.into(),
            description: String::new(),
            top_performer: false,
        }
    }

    #[test]
    fn emits_every_preset_topic() {
        let insights = StaticTopicSource.emit(&[], now());
        assert_eq!(insights.len(), TOPICS.len());
        assert!(insights.iter().all(|i| i.kind == InsightKind::Topic));
    }

    #[test]
    fn confidence_rises_when_content_matches() {
        let content = vec![record_about("my favorite ai tools this year")];
        let insights = StaticTopicSource.emit(&content, now());

        let ai = insights.iter().find(|i| i.keyword == "ai tools").unwrap();
        let other = insights
            .iter()
            .find(|i| i.keyword == "budget travel")
            .unwrap();
        assert!((ai.confidence - 0.8).abs() < 1e-9);
        assert!((other.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn volumes_follow_the_invariant() {
        for i in StaticTopicSource.emit(&[], now()) {
            assert_eq!(
                i.predicted_volume,
                (i.current_volume as f64 * (1.0 + i.growth_rate / 100.0)).round() as u64
            );
        }
    }

    #[test]
    fn emerging_names_are_growth_ordered() {
        let names = emerging_topic_names();
        assert_eq!(names[0], "ai tools");
        assert_eq!(names.len(), TOPICS.len());
    }
}
