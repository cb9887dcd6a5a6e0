use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::mapping::{CandidateRecord, JobRow};
use super::service::MatchService;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub job: JobRow,
    pub candidate: CandidateRecord,
    #[serde(default = "semantic_by_default")]
    pub include_semantic: bool,
}

#[derive(Debug, Deserialize)]
pub struct BatchMatchRequest {
    pub jobs: Vec<JobRow>,
    pub candidate: CandidateRecord,
}

fn semantic_by_default() -> bool {
    true
}

/// Router builder exposing single and batch match endpoints.
pub fn match_router(service: Arc<MatchService>) -> Router {
    Router::new()
        .route("/api/v1/matches", post(score_handler))
        .route("/api/v1/matches/batch", post(batch_handler))
        .with_state(service)
}

pub(crate) async fn score_handler(
    State(service): State<Arc<MatchService>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response {
    match service
        .score(request.job, request.candidate, request.include_semantic)
        .await
    {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => unprocessable(error.to_string()),
    }
}

pub(crate) async fn batch_handler(
    State(service): State<Arc<MatchService>>,
    axum::Json(request): axum::Json<BatchMatchRequest>,
) -> Response {
    match service.score_batch(request.jobs, request.candidate).await {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => unprocessable(error.to_string()),
    }
}

fn unprocessable(message: String) -> Response {
    let payload = json!({
        "error": message,
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
