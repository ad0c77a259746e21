use async_trait::async_trait;
use thiserror::Error;
use validator::Validate;
use crate::models::{MatchScore, PersonProfile};

/// Errors that can occur while scoring a seeker/candidate pair
#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("no API key configured for the compatibility model")]
    MissingCredential,

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Score failed schema validation: {0}")]
    SchemaError(#[from] validator::ValidationErrors),
}

/// Semantic compatibility scorer for a seeker/candidate pair
///
/// Implementations must be stateless with respect to a single call so the
/// pipeline can score candidates concurrently.
#[async_trait]
pub trait CompatibilityScorer: Send + Sync {
    /// Fail with [`ScorerError::MissingCredential`] if the scorer can never succeed
    fn ensure_configured(&self) -> Result<(), ScorerError> {
        Ok(())
    }

    async fn score(
        &self,
        seeker: &PersonProfile,
        candidate: &PersonProfile,
    ) -> Result<MatchScore, ScorerError>;

    fn name(&self) -> &str;
}

/// Validate a score received from outside the crate before it is used
pub fn validate_match_score(score: &MatchScore) -> Result<(), ScorerError> {
    if !score.compatibility_score.is_finite() {
        return Err(ScorerError::InvalidResponse(format!(
            "compatibilityScore is not a finite number: {}",
            score.compatibility_score
        )));
    }

    score.validate()?;
    Ok(())
}
