use crate::error::Result;
use crate::types::{TrendAnalysisResult, TrendInsight};
use askama::Template;
use chrono::Utc;
use std::path::Path;

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub generated_at: String,
    pub platform: String,
    pub total_content: usize,
    pub insights: Vec<InsightView>,
    pub top_hashtags: Vec<String>,
    pub optimal_post_times: Vec<String>,
    pub emerging_topics: Vec<String>,
    pub viral_candidates: Vec<String>,
}

pub struct InsightView {
    pub kind: String,
    pub keyword: String,
    pub trend_score: u8,
    pub score_class: String,
    pub confidence_pct: u32,
    pub growth_rate: String,
    pub current_volume: u64,
    pub predicted_volume: u64,
    pub timeframe: String,
    pub recommended_action: String,
    pub content_suggestions: Vec<String>,
}

fn score_class(score: u8) -> &'static str {
    if score > 70 {
        "text-green-400"
    } else if score > 40 {
        "text-blue-400"
    } else {
        "text-yellow-400"
    }
}

pub fn render(
    insights: &[TrendInsight],
    analysis: &TrendAnalysisResult,
    platform: &str,
    total_content: usize,
) -> Result<String> {
    let insight_views: Vec<InsightView> = insights
        .iter()
        .map(|i| InsightView {
            kind: i.kind.to_string(),
            keyword: i.keyword.clone(),
            trend_score: i.trend_score,
            score_class: score_class(i.trend_score).to_string(),
            confidence_pct: (i.confidence * 100.0) as u32,
            growth_rate: format!("{:+.1}%", i.growth_rate),
            current_volume: i.current_volume,
            predicted_volume: i.predicted_volume,
            timeframe: i.timeframe.to_string(),
            recommended_action: i.recommended_action.clone(),
            content_suggestions: i.content_suggestions.clone(),
        })
        .collect();

    let template = ReportTemplate {
        generated_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        platform: platform.to_string(),
        total_content,
        insights: insight_views,
        top_hashtags: analysis
            .top_hashtags
            .iter()
            .map(|h| format!("{} ({} uses, {} engagement)", h.hashtag, h.uses, h.total_engagement))
            .collect(),
        optimal_post_times: analysis.optimal_post_times.clone(),
        emerging_topics: analysis.emerging_topics.clone(),
        viral_candidates: analysis.viral_candidates.clone(),
    };

    Ok(template.render()?)
}

pub fn write_report(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}
