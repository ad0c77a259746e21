// Integration tests for Love Match

use actix_web::{test, web, App};
use async_trait::async_trait;
use love_match::models::{MatchScore, RankMatchesResponse};
use love_match::routes::{self, matches::AppState};
use love_match::services::{AnthropicOptions, AnthropicScorer, CompatibilityScorer, ScorerError};
use love_match::{MatchError, MatchPipeline, MatchRequest, PersonProfile};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Deterministic scorer: looks scores up by candidate id
struct StubScorer {
    scores: HashMap<String, f64>,
    calls: AtomicUsize,
}

impl StubScorer {
    fn new(scores: &[(&str, f64)]) -> Arc<Self> {
        Arc::new(Self {
            scores: scores.iter().map(|(id, s)| (id.to_string(), *s)).collect(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl CompatibilityScorer for StubScorer {
    async fn score(
        &self,
        _seeker: &PersonProfile,
        candidate: &PersonProfile,
    ) -> Result<MatchScore, ScorerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(MatchScore {
            compatibility_score: self.scores.get(&candidate.id).copied().unwrap_or(0.0),
            short_summary: format!("Stub summary for {}", candidate.name),
            strengths: vec!["stub".to_string()],
            concerns: vec![],
            suggested_opening_line: "Hey!".to_string(),
        })
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn create_seeker() -> PersonProfile {
    let mut seeker = PersonProfile::new("seeker", "Maya");
    seeker.interests = strings(&["coffee", "hiking"]);
    seeker.values = strings(&["honesty"]);
    seeker.relationship_goals = strings(&["marriage"]);
    seeker.deal_breakers = strings(&["smoking"]);
    seeker
}

fn create_candidate(id: &str, interests: &[&str], values: &[&str], goals: &[&str]) -> PersonProfile {
    let mut candidate = PersonProfile::new(id, format!("User {}", id));
    candidate.interests = strings(interests);
    candidate.values = strings(values);
    candidate.relationship_goals = strings(goals);
    candidate
}

fn unconfigured_scorer() -> Arc<AnthropicScorer> {
    Arc::new(AnthropicScorer::new(AnthropicOptions::default()).unwrap())
}

#[tokio::test]
async fn test_integration_end_to_end_ranking() {
    let scorer = StubScorer::new(&[("a", 70.0), ("b", 90.0), ("c", 60.0), ("d", 85.0)]);
    let pipeline = MatchPipeline::with_default_weights(scorer.clone());

    let mut blocked = create_candidate("b", &["hiking"], &[], &[]);
    blocked.location = Some("Likes smoking at bars".to_string());

    let candidates = vec![
        create_candidate("a", &["Coffee", "hiking"], &["honesty"], &["marriage"]), // 70 + 6 + 5 + 7
        blocked,                                                                 // 90 capped to 25
        create_candidate("c", &["coffee"], &[], &[]),                            // 60 + 3
        create_candidate("d", &[], &[], &[]),                                    // 85
    ];
    let request = MatchRequest::new(create_seeker(), candidates).with_top_k(10);

    let results = pipeline.run(&request).await.unwrap();

    assert_eq!(scorer.calls.load(Ordering::SeqCst), 4);
    let ranked: Vec<(&str, f64)> = results
        .iter()
        .map(|r| (r.candidate.id.as_str(), r.final_score))
        .collect();
    assert_eq!(ranked, vec![("a", 88.0), ("d", 85.0), ("c", 63.0), ("b", 25.0)]);

    let b = &results[3];
    assert!(b.blocked_by_deal_breaker);
    assert_eq!(b.hard_filter_reasons, vec!["Matched seeker deal-breaker: \"smoking\"".to_string()]);
    assert_eq!(b.score.compatibility_score, 90.0);

    for result in &results {
        assert!((0.0..=100.0).contains(&result.final_score));
        assert_eq!(result.blocked_by_deal_breaker, !result.hard_filter_reasons.is_empty());
    }
}

#[tokio::test]
async fn test_integration_scenario_b_blocked_ignores_boost() {
    let scorer = StubScorer::new(&[("c", 90.0)]);
    let pipeline = MatchPipeline::with_default_weights(scorer);

    let mut candidate = create_candidate("c", &["coffee", "hiking"], &["honesty"], &["marriage"]);
    candidate.location = Some("likes smoking at bars".to_string());

    let results = pipeline
        .run(&MatchRequest::new(create_seeker(), vec![candidate]))
        .await
        .unwrap();

    assert!(results[0].blocked_by_deal_breaker);
    assert_eq!(results[0].final_score, 25.0);
}

#[tokio::test]
async fn test_integration_scenario_c_top_k() {
    let scorer = StubScorer::new(&[("1", 90.0), ("2", 80.0), ("3", 70.0), ("4", 60.0), ("5", 50.0)]);
    let pipeline = MatchPipeline::with_default_weights(scorer);

    // Input order deliberately shuffled
    let candidates = ["3", "5", "1", "4", "2"]
        .iter()
        .map(|id| create_candidate(id, &[], &[], &[]))
        .collect();
    let request = MatchRequest::new(PersonProfile::new("seeker", "Maya"), candidates).with_top_k(2);

    let results = pipeline.run(&request).await.unwrap();

    let ranked: Vec<(&str, f64)> = results
        .iter()
        .map(|r| (r.candidate.id.as_str(), r.final_score))
        .collect();
    assert_eq!(ranked, vec![("1", 90.0), ("2", 80.0)]);
}

#[tokio::test]
async fn test_integration_result_count_is_min_of_top_k_and_candidates() {
    for (count, top_k) in [(1, 5), (3, 3), (7, 5), (4, 100)] {
        let scorer = StubScorer::new(&[]);
        let pipeline = MatchPipeline::with_default_weights(scorer);
        let candidates = (0..count)
            .map(|i| create_candidate(&format!("c{}", i), &[], &[], &[]))
            .collect();
        let request = MatchRequest::new(create_seeker(), candidates).with_top_k(top_k);

        let results = pipeline.run(&request).await.unwrap();

        assert_eq!(results.len(), count.min(top_k));
    }
}

#[tokio::test]
async fn test_integration_scenario_d_missing_credential() {
    let pipeline = MatchPipeline::with_default_weights(unconfigured_scorer());

    for count in [1, 3] {
        let candidates = (0..count)
            .map(|i| create_candidate(&format!("c{}", i), &[], &[], &[]))
            .collect();
        let request = MatchRequest::new(create_seeker(), candidates);

        let err = pipeline.run(&request).await.unwrap_err();

        assert!(matches!(err, MatchError::Configuration(_)), "got {:?}", err);
    }
}

#[actix_web::test]
async fn test_http_rank_matches() {
    let scorer = StubScorer::new(&[("a", 40.0), ("b", 75.0)]);
    let state = AppState {
        pipeline: MatchPipeline::with_default_weights(scorer),
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/rank")
        .set_json(json!({
            "seeker": { "id": "s", "name": "Maya", "interests": ["coffee"] },
            "candidates": [
                { "id": "a", "name": "Leo", "interests": ["coffee"] },
                { "id": "b", "name": "Iris" }
            ],
            "topK": 1
        }))
        .to_request();
    let resp: RankMatchesResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.total_candidates, 2);
    assert_eq!(resp.matches.len(), 1);
    assert_eq!(resp.matches[0].candidate.id, "b");
    assert_eq!(resp.matches[0].final_score, 75.0);
}

#[actix_web::test]
async fn test_http_validation_and_configuration_errors() {
    let state = AppState {
        pipeline: MatchPipeline::with_default_weights(StubScorer::new(&[])),
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/rank")
        .set_json(json!({ "seeker": { "id": "s", "name": "Maya" }, "candidates": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let state = AppState {
        pipeline: MatchPipeline::with_default_weights(unconfigured_scorer()),
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/rank")
        .set_json(json!({
            "seeker": { "id": "s", "name": "Maya" },
            "candidates": [{ "id": "a", "name": "Leo" }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 503);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["scorerConfigured"], false);
}
