// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{PersonProfile, MatchScore, MatchResult, BoostWeights};
pub use requests::{MatchRequest, MAX_TOP_K, default_top_k, parse_top_k, sanitize_top_k};
pub use responses::{RankMatchesResponse, HealthResponse, ErrorResponse};
