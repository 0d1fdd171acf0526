use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Social platform a piece of content or an account lives on.
///
/// Unknown platform strings are preserved as [`Platform::Other`] rather than
/// rejected; market-context lookups fall back to Instagram's table for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Instagram,
    Tiktok,
    Youtube,
    Other(String),
}

impl From<String> for Platform {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "instagram" => Self::Instagram,
            "tiktok" => Self::Tiktok,
            "youtube" => Self::Youtube,
            _ => Self::Other(s),
        }
    }
}

impl From<Platform> for String {
    fn from(p: Platform) -> Self {
        p.to_string()
    }
}

impl std::str::FromStr for Platform {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instagram => write!(f, "instagram"),
            Self::Tiktok => write!(f, "tiktok"),
            Self::Youtube => write!(f, "youtube"),
            Self::Other(s) => write!(f, "{}", s.to_lowercase()),
        }
    }
}

/// One published piece of content with its performance counters.
///
/// Counters default to 0 when absent from the input; the engine treats the
/// record as immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub platform: Platform,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub views: u64,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub top_performer: bool,
}

impl ContentRecord {
    /// Likes plus comments, the engagement measure every analyzer shares.
    pub fn engagement(&self) -> u64 {
        self.likes + self.comments
    }
}

/// Point-in-time snapshot of a social account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub platform: Platform,
    #[serde(default)]
    pub followers: u64,
    /// Engagement rate in percent. Upstream stores this as a decimal string,
    /// so both `"4.2"` and `4.2` deserialize.
    #[serde(default, deserialize_with = "de_rate")]
    pub engagement_rate: f64,
}

fn de_rate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rate {
        Num(f64),
        Text(String),
    }

    match Rate::deserialize(deserializer)? {
        Rate::Num(n) => Ok(n),
        Rate::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

/// Dimension a trend insight speaks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Hashtag,
    Topic,
    ContentType,
    PostingTime,
    Seasonal,
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hashtag => write!(f, "hashtag"),
            Self::Topic => write!(f, "topic"),
            Self::ContentType => write!(f, "content_type"),
            Self::PostingTime => write!(f, "posting_time"),
            Self::Seasonal => write!(f, "seasonal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// One scored, explainable prediction about a content dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendInsight {
    pub kind: InsightKind,
    pub keyword: String,
    pub current_volume: u64,
    pub predicted_volume: u64,
    /// Estimated growth in percent.
    pub growth_rate: f64,
    /// 0-100 ranking heuristic.
    pub trend_score: u8,
    /// 0-1 sample-size heuristic, not a statistical probability.
    pub confidence: f64,
    pub timeframe: Timeframe,
    pub peak_prediction: DateTime<Utc>,
    pub recommended_action: String,
    pub content_suggestions: Vec<String>,
}

impl TrendInsight {
    /// Single construction path for every generator.
    ///
    /// Clamps `trend_score` to 0-100 and `confidence` to 0-1, and derives
    /// `predicted_volume = round(current_volume * (1 + growth_rate/100))`
    /// so the volume invariant holds for every emitted insight.
    #[allow(clippy::too_many_arguments)]
    pub fn scored(
        kind: InsightKind,
        keyword: impl Into<String>,
        current_volume: u64,
        growth_rate: f64,
        raw_score: f64,
        confidence: f64,
        timeframe: Timeframe,
        peak_prediction: DateTime<Utc>,
        recommended_action: impl Into<String>,
        content_suggestions: Vec<String>,
    ) -> Self {
        let predicted = (current_volume as f64 * (1.0 + growth_rate / 100.0))
            .round()
            .max(0.0) as u64;
        Self {
            kind,
            keyword: keyword.into(),
            current_volume,
            predicted_volume: predicted,
            growth_rate,
            trend_score: raw_score.clamp(0.0, 100.0).round() as u8,
            confidence: confidence.clamp(0.0, 1.0),
            timeframe,
            peak_prediction,
            recommended_action: recommended_action.into(),
            content_suggestions,
        }
    }
}

/// Narrative prediction produced by the AI analyzer.
///
/// Deliberately a different shape from [`TrendInsight`]: the two serve
/// different dashboard surfaces and are never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPrediction {
    pub id: String,
    pub platform: Platform,
    pub trend: String,
    pub confidence: f64,
    pub timeframe: Timeframe,
    /// Predicted growth in percent.
    pub predicted_growth: f64,
    pub content_suggestions: Vec<String>,
    pub hashtag_recommendations: Vec<String>,
    pub best_post_times: Vec<String>,
    pub target_audience: String,
    pub reasoning: String,
}

/// Row shape the repository persists for a prediction.
///
/// Hashtag recommendations and best post times are not persisted columns;
/// the cached read path regenerates them from market-context defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPrediction {
    pub id: String,
    pub user_id: String,
    pub platform: Platform,
    pub trend: String,
    pub confidence: f64,
    pub timeframe: Timeframe,
    pub predicted_growth: f64,
    pub content_suggestions: Vec<String>,
    pub target_audience: String,
    pub reasoning: String,
    pub created_at: DateTime<Utc>,
}

/// One-line "top trend" widget payload. Always non-empty: a static fallback
/// covers the no-predictions case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickInsights {
    pub top_trend: String,
    pub confidence: f64,
    pub quick_tips: Vec<String>,
    pub next_analysis: DateTime<Utc>,
}

/// A milestone the creator hit, fed into the analyzer prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMilestone {
    pub title: String,
    pub metric: String,
    pub value: f64,
    pub achieved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCategory {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandCollaboration {
    pub brand: String,
    pub status: String,
    #[serde(default)]
    pub budget: f64,
}

/// Direction a content type's performance is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Rising,
    Steady,
    Declining,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rising => write!(f, "Rising"),
            Self::Steady => write!(f, "Steady"),
            Self::Declining => write!(f, "Declining"),
        }
    }
}

impl TrendDirection {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Rising => "text-green-400",
            Self::Steady => "text-blue-400",
            Self::Declining => "text-red-400",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagStat {
    pub hashtag: String,
    pub uses: usize,
    pub total_engagement: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTypeTrend {
    pub content_type: String,
    pub avg_engagement: f64,
    pub direction: TrendDirection,
}

/// One point in a time series derived from history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalPattern {
    pub season: String,
    pub theme: String,
    /// 0-1 likelihood that the theme lands this season.
    pub likelihood: f64,
}

/// Dashboard aggregate derived from one creator's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysisResult {
    pub top_hashtags: Vec<HashtagStat>,
    pub emerging_topics: Vec<String>,
    pub optimal_post_times: Vec<String>,
    pub content_type_performance: Vec<ContentTypeTrend>,
    pub audience_growth: Vec<TrendPoint>,
    pub engagement_trend: Vec<TrendPoint>,
    pub competitor_insights: Vec<String>,
    pub seasonal_patterns: Vec<SeasonalPattern>,
    pub viral_candidates: Vec<String>,
}
