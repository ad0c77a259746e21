// Core algorithm exports
pub mod boost;
pub mod deal_breakers;
pub mod pipeline;
pub mod text;

pub use boost::{deterministic_boost, weighted_boost, SharedCounts};
pub use deal_breakers::check_deal_breakers;
pub use pipeline::{fuse_scores, MatchError, MatchPipeline, DEAL_BREAKER_SCORE_CAP};
pub use text::{normalize, overlap_count};
