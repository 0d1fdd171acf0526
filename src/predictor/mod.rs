//! LLM-backed trend prediction with a deterministic local fallback.
//!
//! Independent from the heuristic insight engine: this path produces
//! [`TrendPrediction`] narratives for the AI panel, while `analysis` produces
//! [`crate::types::TrendInsight`] rows for the insights panel. The two shapes
//! are never merged.

pub mod context;
pub mod fallback;

pub use context::{MarketContext, market_context};

use crate::error::{Error, Result};
use crate::llm::LlmClient;
use crate::repository::Repository;
use crate::types::{
    AccountSnapshot, BrandCollaboration, ContentCategory, ContentRecord, PerformanceMilestone,
    Platform, QuickInsights, StoredPrediction, Timeframe, TrendPrediction,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::{info, warn};

const SYSTEM_PROMPT: &str = r##"You are a social media strategist analyzing one creator's account data to predict which trends they should ride next.

You receive the creator's platform, follower snapshots, recent content performance, milestones, categories, and brand collaborations, plus a market-context table of current platform best practices.

For each prediction, provide:
1. A specific trend label. "POV-style reels for skincare routines", not "video is growing".
2. Confidence (0.0-1.0) grounded in how much of the creator's own data supports it.
3. Predicted growth in percent over the requested timeframe.
4. 2-4 concrete content suggestions the creator can act on this week.
5. Hashtag recommendations and best posting times for this creator.
6. The target audience segment and a short reasoning paragraph tied to the data.

Respond in JSON:
{
  "predictions": [
    {
      "trend": "...",
      "confidence": 0.8,
      "timeframe": "weekly",
      "predicted_growth": 15.0,
      "content_suggestions": ["..."],
      "hashtag_recommendations": ["#..."],
      "best_post_times": ["19:00-21:00"],
      "target_audience": "...",
      "reasoning": "..."
    }
  ],
  "overall_insights": {
    "summary": "..."
  }
}

Rules:
- 2-4 predictions. Quality over quantity.
- Ground every prediction in the supplied data; do not invent metrics.
- Suggestions must be specific enough to schedule."##;

#[derive(Deserialize)]
struct AnalysisResponse {
    #[serde(default)]
    predictions: Vec<RawPrediction>,
    #[serde(default)]
    #[allow(dead_code)] // narrative summary, surfaced to the UI layer only
    overall_insights: serde_json::Value,
}

#[derive(Deserialize)]
struct RawPrediction {
    trend: String,
    confidence: f64,
    #[serde(default)]
    timeframe: Option<Timeframe>,
    #[serde(default)]
    predicted_growth: f64,
    #[serde(default)]
    content_suggestions: Vec<String>,
    #[serde(default)]
    hashtag_recommendations: Vec<String>,
    #[serde(default)]
    best_post_times: Vec<String>,
    #[serde(default)]
    target_audience: String,
    #[serde(default)]
    reasoning: String,
}

/// Persistence results for one analysis run, partitioned so callers and
/// tests can inspect both sides without scraping logs.
#[derive(Debug, Default)]
pub struct PersistOutcome {
    pub saved: Vec<String>,
    pub failed: Vec<(String, Error)>,
}

/// Orchestrates gather, remote completion, fallback, normalization, and
/// best-effort persistence for one user's trend analysis.
///
/// The completion client is injected so tests can point it at a mock server.
pub struct TrendAnalyzer<R> {
    llm: LlmClient,
    repository: R,
}

impl<R: Repository> TrendAnalyzer<R> {
    pub fn new(llm: LlmClient, repository: R) -> Self {
        Self { llm, repository }
    }

    /// Run a full analysis for one user.
    ///
    /// Quota exhaustion on the remote call is recovered via the local
    /// fallback generator; any other remote failure propagates. Persistence
    /// failures are per-prediction and never abort the call: the caller
    /// always receives the freshly computed predictions.
    pub async fn analyze_trends(
        &self,
        user_id: &str,
        platform: &Platform,
        timeframe: Timeframe,
    ) -> Result<Vec<TrendPrediction>> {
        let (accounts, content, milestones, categories, collaborations) = tokio::join!(
            self.repository.social_accounts(user_id),
            self.repository.portfolio_content(user_id, Some(platform)),
            self.repository.performance_milestones(user_id),
            self.repository.content_categories(user_id),
            self.repository.brand_collaborations(user_id),
        );
        let accounts = accounts?;
        let content = content?;
        let milestones = milestones?;
        let categories = categories?;
        let collaborations = collaborations?;

        info!(
            user_id,
            %platform,
            content = content.len(),
            accounts = accounts.len(),
            "gathered creator data"
        );

        let ctx = market_context(platform);
        let prompt = build_prompt(
            platform,
            timeframe,
            &accounts,
            &content,
            &milestones,
            &categories,
            &collaborations,
            ctx,
        );

        let predictions = match self
            .llm
            .complete_json::<AnalysisResponse>(SYSTEM_PROMPT, &prompt)
            .await
        {
            Ok(response) => normalize_predictions(response.predictions, platform, timeframe),
            Err(e) if e.is_quota() => {
                warn!("completion quota exhausted, using local fallback generator");
                assign_ids(fallback::fallback_predictions(platform, timeframe, ctx))
            }
            Err(Error::Remote(msg)) => return Err(Error::Remote(msg)),
            Err(e) => return Err(Error::remote(e.to_string())),
        };

        let outcome = self.persist_predictions(user_id, &predictions).await;
        info!(
            saved = outcome.saved.len(),
            failed = outcome.failed.len(),
            "persisted predictions"
        );

        Ok(predictions)
    }

    /// Store each prediction, partitioning successes and failures.
    ///
    /// Failures are logged per item and swallowed: a lost row must not cost
    /// the user the analysis they just paid for.
    pub async fn persist_predictions(
        &self,
        user_id: &str,
        predictions: &[TrendPrediction],
    ) -> PersistOutcome {
        let mut outcome = PersistOutcome::default();
        let created_at = Utc::now();

        for prediction in predictions {
            let row = StoredPrediction {
                id: prediction.id.clone(),
                user_id: user_id.to_string(),
                platform: prediction.platform.clone(),
                trend: prediction.trend.clone(),
                confidence: prediction.confidence,
                timeframe: prediction.timeframe,
                predicted_growth: prediction.predicted_growth,
                content_suggestions: prediction.content_suggestions.clone(),
                target_audience: prediction.target_audience.clone(),
                reasoning: prediction.reasoning.clone(),
                created_at,
            };
            match self.repository.create_trend_prediction(row).await {
                Ok(()) => outcome.saved.push(prediction.id.clone()),
                Err(e) => {
                    warn!(id = %prediction.id, error = %e, "failed to persist prediction");
                    outcome.failed.push((prediction.id.clone(), e));
                }
            }
        }

        outcome
    }

    /// Read back previously persisted predictions.
    ///
    /// Hashtag recommendations and best post times are not persisted
    /// columns, so they are regenerated from the market-context defaults for
    /// the row's platform.
    pub async fn cached_predictions(
        &self,
        user_id: &str,
        platform: Option<&Platform>,
    ) -> Result<Vec<TrendPrediction>> {
        let rows = self.repository.trend_predictions(user_id, platform).await?;
        Ok(rows.into_iter().map(stored_to_prediction).collect())
    }

    /// One-line "top trend" widget: the highest-confidence cached prediction,
    /// or a static fallback when nothing is cached yet. Never empty.
    pub async fn quick_insights(
        &self,
        user_id: &str,
        platform: &Platform,
    ) -> Result<QuickInsights> {
        let cached = self.cached_predictions(user_id, Some(platform)).await?;
        let next_analysis = Utc::now() + Duration::hours(24);

        let Some(best) = cached
            .into_iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        else {
            let ctx = market_context(platform);
            return Ok(QuickInsights {
                top_trend: format!(
                    "{} momentum on {platform}",
                    ctx.trending_formats.first().copied().unwrap_or("video")
                ),
                confidence: 0.6,
                quick_tips: vec![
                    "Post inside the platform's peak windows".into(),
                    "Lead with your strongest format".into(),
                    "Run an analysis to unlock personalized tips".into(),
                ],
                next_analysis,
            });
        };

        let mut quick_tips: Vec<String> =
            best.content_suggestions.iter().take(3).cloned().collect();
        if quick_tips.is_empty() {
            quick_tips.push(format!("Lean into: {}", best.trend));
        }

        Ok(QuickInsights {
            top_trend: best.trend,
            confidence: best.confidence,
            quick_tips,
            next_analysis,
        })
    }
}

/// Clamp, assign ids, and guarantee at least one prediction.
fn normalize_predictions(
    raw: Vec<RawPrediction>,
    platform: &Platform,
    timeframe: Timeframe,
) -> Vec<TrendPrediction> {
    let mut predictions: Vec<TrendPrediction> = raw
        .into_iter()
        .map(|p| TrendPrediction {
            id: uuid::Uuid::new_v4().to_string(),
            platform: platform.clone(),
            trend: p.trend,
            confidence: p.confidence.clamp(0.0, 1.0),
            timeframe: p.timeframe.unwrap_or(timeframe),
            predicted_growth: p.predicted_growth,
            content_suggestions: p.content_suggestions,
            hashtag_recommendations: p.hashtag_recommendations,
            best_post_times: p.best_post_times,
            target_audience: p.target_audience,
            reasoning: p.reasoning,
        })
        .collect();

    if predictions.is_empty() {
        predictions.push(default_prediction(platform, timeframe));
    }
    predictions
}

fn assign_ids(predictions: Vec<TrendPrediction>) -> Vec<TrendPrediction> {
    predictions
        .into_iter()
        .map(|mut p| {
            if p.id.is_empty() {
                p.id = uuid::Uuid::new_v4().to_string();
            }
            p.confidence = p.confidence.clamp(0.0, 1.0);
            p
        })
        .collect()
}

/// Injected when the model returns an empty prediction list.
fn default_prediction(platform: &Platform, timeframe: Timeframe) -> TrendPrediction {
    let ctx = market_context(platform);
    TrendPrediction {
        id: uuid::Uuid::new_v4().to_string(),
        platform: platform.clone(),
        trend: "Content Optimization".into(),
        confidence: 0.6,
        timeframe,
        predicted_growth: 10.0,
        content_suggestions: vec![
            "Tighten hooks in the first three seconds".into(),
            "Publish during peak windows".into(),
        ],
        hashtag_recommendations: ctx.hashtags.iter().map(|s| s.to_string()).collect(),
        best_post_times: ctx.peak_times.iter().map(|s| s.to_string()).collect(),
        target_audience: "Current followers".into(),
        reasoning: "The model returned no predictions; surfacing baseline optimizations instead."
            .into(),
    }
}

fn stored_to_prediction(row: StoredPrediction) -> TrendPrediction {
    let ctx = market_context(&row.platform);
    TrendPrediction {
        id: row.id,
        platform: row.platform,
        trend: row.trend,
        confidence: row.confidence,
        timeframe: row.timeframe,
        predicted_growth: row.predicted_growth,
        content_suggestions: row.content_suggestions,
        hashtag_recommendations: ctx.hashtags.iter().map(|s| s.to_string()).collect(),
        best_post_times: ctx.peak_times.iter().map(|s| s.to_string()).collect(),
        target_audience: row.target_audience,
        reasoning: row.reasoning,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_prompt(
    platform: &Platform,
    timeframe: Timeframe,
    accounts: &[AccountSnapshot],
    content: &[ContentRecord],
    milestones: &[PerformanceMilestone],
    categories: &[ContentCategory],
    collaborations: &[BrandCollaboration],
    ctx: &MarketContext,
) -> String {
    let account_lines: Vec<String> = accounts
        .iter()
        .map(|a| {
            format!(
                "- {}: {} followers, {:.2}% engagement rate",
                a.platform, a.followers, a.engagement_rate
            )
        })
        .collect();

    let content_lines: Vec<String> = content
        .iter()
        .take(25)
        .map(|c| {
            format!(
                "- \"{}\" [{}] likes={} comments={} views={} published={}",
                c.title,
                c.categories.join(", "),
                c.likes,
                c.comments,
                c.views,
                c.published_at.format("%Y-%m-%d")
            )
        })
        .collect();

    let milestone_lines: Vec<String> = milestones
        .iter()
        .map(|m| format!("- {} ({} = {})", m.title, m.metric, m.value))
        .collect();

    let category_names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    let collab_lines: Vec<String> = collaborations
        .iter()
        .map(|c| format!("- {} ({}, budget {:.0})", c.brand, c.status, c.budget))
        .collect();

    format!(
        "Analyze this creator's data and predict {timeframe} trends for {platform}.\n\n\
         Accounts:\n{}\n\n\
         Recent content ({} items):\n{}\n\n\
         Milestones:\n{}\n\n\
         Declared categories: {}\n\n\
         Brand collaborations:\n{}\n\n\
         Market context for {platform}:\n\
         - trending formats: {}\n\
         - popular categories: {}\n\
         - peak times: {}\n\
         - common hashtags: {}\n\
         - algorithm preference: {}",
        account_lines.join("\n"),
        content.len(),
        content_lines.join("\n"),
        milestone_lines.join("\n"),
        category_names.join(", "),
        collab_lines.join("\n"),
        ctx.trending_formats.join(", "),
        ctx.popular_categories.join(", "),
        ctx.peak_times.join(", "),
        ctx.hashtags.join(", "),
        ctx.algorithm_preference,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_clamps_confidence_and_assigns_ids() {
        let raw = vec![RawPrediction {
            trend: "overconfident".into(),
            confidence: 1.7,
            timeframe: None,
            predicted_growth: 20.0,
            content_suggestions: vec![],
            hashtag_recommendations: vec![],
            best_post_times: vec![],
            target_audience: String::new(),
            reasoning: String::new(),
        }];
        let out = normalize_predictions(raw, &Platform::Instagram, Timeframe::Weekly);
        assert_eq!(out.len(), 1);
        assert!((out[0].confidence - 1.0).abs() < f64::EPSILON);
        assert!(!out[0].id.is_empty());
        assert_eq!(out[0].timeframe, Timeframe::Weekly);
    }

    #[test]
    fn empty_model_output_injects_default_prediction() {
        let out = normalize_predictions(vec![], &Platform::Youtube, Timeframe::Monthly);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].trend, "Content Optimization");
        assert_eq!(out[0].timeframe, Timeframe::Monthly);
    }

    #[test]
    fn stored_rows_regain_static_recommendations() {
        let row = StoredPrediction {
            id: "p1".into(),
            user_id: "u1".into(),
            platform: Platform::Tiktok,
            trend: "duets".into(),
            confidence: 0.8,
            timeframe: Timeframe::Weekly,
            predicted_growth: 25.0,
            content_suggestions: vec!["duet a big account".into()],
            target_audience: "gen z".into(),
            reasoning: "duets spike".into(),
            created_at: Utc::now(),
        };
        let prediction = stored_to_prediction(row);
        assert_eq!(
            prediction.hashtag_recommendations,
            market_context(&Platform::Tiktok)
                .hashtags
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
        );
        assert!(!prediction.best_post_times.is_empty());
        assert_eq!(prediction.content_suggestions, vec!["duet a big account"]);
    }

    #[test]
    fn prompt_embeds_market_context_and_data() {
        let ctx = market_context(&Platform::Tiktok);
        let prompt = build_prompt(
            &Platform::Tiktok,
            Timeframe::Weekly,
            &[],
            &[],
            &[],
            &[ContentCategory {
                name: "comedy".into(),
            }],
            &[],
            ctx,
        );
        assert!(prompt.contains("comedy"));
        assert!(prompt.contains("completion rate"));
        assert!(prompt.contains("weekly"));
    }
}
