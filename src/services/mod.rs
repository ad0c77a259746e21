// Service exports
pub mod anthropic;
pub mod scorer;

pub use anthropic::{AnthropicOptions, AnthropicScorer, match_score_schema};
pub use scorer::{CompatibilityScorer, ScorerError, validate_match_score};
