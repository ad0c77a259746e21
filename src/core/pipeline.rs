use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;
use crate::core::{boost::deterministic_boost, deal_breakers::check_deal_breakers};
use crate::models::{BoostWeights, MatchRequest, MatchResult, PersonProfile};
use crate::services::scorer::{validate_match_score, CompatibilityScorer, ScorerError};

/// Highest final score a candidate that trips a deal-breaker can reach
pub const DEAL_BREAKER_SCORE_CAP: f64 = 25.0;

/// Errors that abort a whole pipeline run
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid match request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Scorer not configured: {0}")]
    Configuration(String),

    #[error("Failed to score candidate {candidate_id}: {source}")]
    Scoring {
        candidate_id: String,
        #[source]
        source: ScorerError,
    },
}

impl MatchError {
    fn from_scorer(candidate_id: &str, err: ScorerError) -> Self {
        match err {
            ScorerError::MissingCredential => {
                MatchError::Configuration(ScorerError::MissingCredential.to_string())
            }
            source => MatchError::Scoring {
                candidate_id: candidate_id.to_string(),
                source,
            },
        }
    }
}

/// Fuse the model score, deal-breaker status and overlap boost into the final score
///
/// Blocked candidates are capped and never receive the boost.
#[inline]
pub fn fuse_scores(model_score: f64, blocked: bool, boost: u32) -> f64 {
    let (capped, bonus) = if blocked {
        (model_score.min(DEAL_BREAKER_SCORE_CAP), 0.0)
    } else {
        (model_score, boost as f64)
    };

    (capped + bonus).clamp(0.0, 100.0)
}

/// Ranking orchestrator
///
/// # Pipeline Stages
/// 1. Request validation
/// 2. Scorer configuration check
/// 3. Per candidate: deal-breaker detection, model scoring, overlap boost, fusion
/// 4. Stable sort by final score and truncation to `topK`
#[derive(Clone)]
pub struct MatchPipeline {
    scorer: Arc<dyn CompatibilityScorer>,
    weights: BoostWeights,
    max_concurrency: usize,
}

impl MatchPipeline {
    pub fn new(scorer: Arc<dyn CompatibilityScorer>, weights: BoostWeights) -> Self {
        Self {
            scorer,
            weights,
            max_concurrency: 1,
        }
    }

    pub fn with_default_weights(scorer: Arc<dyn CompatibilityScorer>) -> Self {
        Self::new(scorer, BoostWeights::default())
    }

    /// Allow up to `max_concurrency` scorer calls in flight (1 = sequential)
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn weights(&self) -> &BoostWeights {
        &self.weights
    }

    pub fn scorer(&self) -> &dyn CompatibilityScorer {
        self.scorer.as_ref()
    }

    /// Rank the request's candidates against its seeker
    ///
    /// Any invalid input, missing scorer configuration or failed candidate
    /// score aborts the run; no partial ranking is ever returned.
    pub async fn run(&self, request: &MatchRequest) -> Result<Vec<MatchResult>, MatchError> {
        request.validate()?;

        self.scorer
            .ensure_configured()
            .map_err(|e| MatchError::Configuration(e.to_string()))?;

        tracing::info!(
            "Ranking {} candidates for seeker {} (topK={}, scorer={})",
            request.candidates.len(),
            request.seeker.id,
            request.top_k,
            self.scorer.name()
        );

        let seeker = &request.seeker;
        let mut results: Vec<MatchResult> = if self.max_concurrency <= 1 {
            let mut results = Vec::with_capacity(request.candidates.len());
            for candidate in &request.candidates {
                results.push(self.evaluate(seeker, candidate).await?);
            }
            results
        } else {
            // `buffered` yields in input order, so ties still resolve by position
            stream::iter(&request.candidates)
                .map(|candidate| self.evaluate(seeker, candidate))
                .buffered(self.max_concurrency)
                .try_collect::<Vec<_>>()
                .await?
        };

        // Vec::sort_by is stable: equal scores keep candidate order
        results.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
        results.truncate(request.top_k);

        tracing::info!(
            "Returning {} of {} ranked candidates for seeker {}",
            results.len(),
            request.candidates.len(),
            seeker.id
        );

        Ok(results)
    }

    async fn evaluate(
        &self,
        seeker: &PersonProfile,
        candidate: &PersonProfile,
    ) -> Result<MatchResult, MatchError> {
        let reasons = check_deal_breakers(seeker, candidate);
        let blocked = !reasons.is_empty();

        let score = match self.scorer.score(seeker, candidate).await {
            Ok(score) => score,
            Err(e) => {
                tracing::warn!("Scorer failed for candidate {}: {}", candidate.id, e);
                return Err(MatchError::from_scorer(&candidate.id, e));
            }
        };
        validate_match_score(&score).map_err(|e| MatchError::from_scorer(&candidate.id, e))?;

        let boost = deterministic_boost(seeker, candidate, &self.weights);
        let final_score = fuse_scores(score.compatibility_score, blocked, boost);

        if blocked {
            tracing::warn!(
                "Candidate {} blocked by {} deal-breaker(s), score capped at {}",
                candidate.id,
                reasons.len(),
                final_score
            );
        } else {
            tracing::debug!(
                "Candidate {}: model={} boost={} final={}",
                candidate.id,
                score.compatibility_score,
                boost,
                final_score
            );
        }

        Ok(MatchResult {
            candidate: candidate.clone(),
            score,
            blocked_by_deal_breaker: blocked,
            hard_filter_reasons: reasons,
            final_score,
        })
    }
}

impl std::fmt::Debug for MatchPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchPipeline")
            .field("scorer", &self.scorer.name())
            .field("weights", &self.weights)
            .field("max_concurrency", &self.max_concurrency)
            .finish()
    }
}
