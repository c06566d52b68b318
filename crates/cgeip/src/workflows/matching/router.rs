use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::criteria::{score_match, MatchResult};
use super::domain::{JobId, JobPosting, JobPreference};
use super::repository::{JobMatchView, JobRepository, PreferenceRepository};
use super::service::{JobMatchService, MatchServiceError};
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::StudentId;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub job: JobPosting,
    pub preference: JobPreference,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub result: MatchResult,
    pub summary: String,
}

/// Router builder exposing job publication and preference matching.
pub fn matching_router<J, P>(service: Arc<JobMatchService<J, P>>) -> Router
where
    J: JobRepository + 'static,
    P: PreferenceRepository + 'static,
{
    Router::new()
        .route("/api/v1/matching/score", post(score_handler))
        .route("/api/v1/jobs", post(publish_handler::<J, P>))
        .route(
            "/api/v1/students/:student_id/job-matches",
            get(student_matches_handler::<J, P>),
        )
        .route(
            "/api/v1/students/:student_id/jobs/:job_id/match",
            get(job_match_handler::<J, P>),
        )
        .with_state(service)
}

pub(crate) async fn score_handler(axum::Json(request): axum::Json<ScoreRequest>) -> Response {
    let result = score_match(&request.job, &request.preference);
    let summary = result.summary();
    (StatusCode::OK, axum::Json(ScoreResponse { result, summary })).into_response()
}

pub(crate) async fn publish_handler<J, P>(
    State(service): State<Arc<JobMatchService<J, P>>>,
    axum::Json(job): axum::Json<JobPosting>,
) -> Response
where
    J: JobRepository + 'static,
    P: PreferenceRepository + 'static,
{
    match service.publish(job) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn student_matches_handler<J, P>(
    State(service): State<Arc<JobMatchService<J, P>>>,
    Path(student_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    P: PreferenceRepository + 'static,
{
    match service.matches_for_student(&StudentId(student_id)) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn job_match_handler<J, P>(
    State(service): State<Arc<JobMatchService<J, P>>>,
    Path((student_id, job_id)): Path<(String, String)>,
) -> Response
where
    J: JobRepository + 'static,
    P: PreferenceRepository + 'static,
{
    match service.score(&JobId(job_id), &StudentId(student_id)) {
        Ok((job, result)) => {
            (StatusCode::OK, axum::Json(JobMatchView::new(&job, &result))).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: MatchServiceError) -> Response {
    let status = match error {
        MatchServiceError::JobNotFound(_) => StatusCode::NOT_FOUND,
        MatchServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        MatchServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
