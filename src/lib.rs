//! Trend-insight engine for the creator marketplace.
//!
//! Two independent paths serve two dashboard surfaces:
//!
//! - [`analysis`] — pure heuristic scoring over a creator's content history,
//!   producing ranked [`types::TrendInsight`] rows and the
//!   [`types::TrendAnalysisResult`] dashboard aggregate.
//! - [`predictor`] — the LLM-backed [`predictor::TrendAnalyzer`], producing
//!   [`types::TrendPrediction`] narratives with a deterministic local
//!   fallback when the completion API is unavailable.
//!
//! Persistence lives behind the [`repository::Repository`] trait; the engine
//! itself holds no state across calls.

pub mod analysis;
pub mod config;
pub mod error;
pub mod http;
pub mod llm;
pub mod output;
pub mod predictor;
pub mod repository;
pub mod types;

pub use analysis::{
    FixedGrowth, GrowthEstimator, SampledGrowth, TrendSource, generate_trend_analysis,
    generate_trend_predictions,
};
pub use error::{Error, Result};
pub use predictor::TrendAnalyzer;
pub use repository::{MemoryRepository, Repository};
