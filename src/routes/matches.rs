use actix_web::{web, HttpResponse, Responder};
use crate::core::{MatchError, MatchPipeline};
use crate::models::{ErrorResponse, HealthResponse, MatchRequest, RankMatchesResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: MatchPipeline,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/rank", web::post().to(rank_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let scorer_configured = state.pipeline.scorer().ensure_configured().is_ok();

    let status = if scorer_configured { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        scorer_configured,
        timestamp: chrono::Utc::now(),
    })
}

/// Rank candidates against a seeker
///
/// Request body:
/// ```json
/// {
///   "seeker": { "id": "string", "name": "string", "dealBreakers": ["string"] },
///   "candidates": [{ "id": "string", "name": "string", "interests": ["string"] }],
///   "topK": 5
/// }
/// ```
async fn rank_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    let request = req.into_inner();
    let total_candidates = request.candidates.len();

    match state.pipeline.run(&request).await {
        Ok(matches) => HttpResponse::Ok().json(RankMatchesResponse {
            matches,
            total_candidates,
        }),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &MatchError) -> HttpResponse {
    let (mut builder, error, status_code) = match err {
        MatchError::Validation(_) => {
            tracing::info!("Rejected match request: {}", err);
            (HttpResponse::BadRequest(), "Validation failed", 400)
        }
        MatchError::Configuration(_) => {
            tracing::error!("Scorer is not configured: {}", err);
            (HttpResponse::ServiceUnavailable(), "Scorer not configured", 503)
        }
        MatchError::Scoring { .. } => {
            tracing::error!("Ranking failed: {}", err);
            (HttpResponse::BadGateway(), "Scoring failed", 502)
        }
    };

    builder.json(ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code,
    })
}
