//! Love Match - compatibility ranking for a seeker and a set of candidates
//!
//! Each candidate goes through a deal-breaker filter, a model-backed
//! compatibility score and a deterministic overlap boost; the fused scores
//! are ranked and truncated to the requested top-K.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{MatchError, MatchPipeline, check_deal_breakers, deterministic_boost, overlap_count};
pub use models::{PersonProfile, MatchRequest, MatchScore, MatchResult, BoostWeights};
pub use services::{AnthropicScorer, CompatibilityScorer, ScorerError};
