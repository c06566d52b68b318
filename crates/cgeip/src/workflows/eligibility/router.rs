use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CourseId, CourseRequirement, Transcript};
use super::evaluator::evaluate;
use super::repository::{CourseRepository, EligibilityView, TranscriptRepository};
use super::service::{EligibilityService, EligibilityServiceError};
use crate::workflows::students::StudentId;

/// Ad-hoc evaluation payload for records that are not stored yet.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub transcript: Transcript,
    pub requirement: CourseRequirement,
}

/// Router builder exposing course eligibility checks.
pub fn eligibility_router<T, C>(service: Arc<EligibilityService<T, C>>) -> Router
where
    T: TranscriptRepository + 'static,
    C: CourseRepository + 'static,
{
    Router::new()
        .route("/api/v1/eligibility/evaluate", post(evaluate_handler))
        .route(
            "/api/v1/students/:student_id/courses/:course_id/eligibility",
            get(course_handler::<T, C>),
        )
        .route(
            "/api/v1/students/:student_id/eligible-courses",
            get(catalogue_handler::<T, C>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler(axum::Json(request): axum::Json<EvaluateRequest>) -> Response {
    let result = evaluate(&request.transcript, &request.requirement);
    (
        StatusCode::OK,
        axum::Json(EligibilityView::from_result(&result)),
    )
        .into_response()
}

pub(crate) async fn course_handler<T, C>(
    State(service): State<Arc<EligibilityService<T, C>>>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Response
where
    T: TranscriptRepository + 'static,
    C: CourseRepository + 'static,
{
    match service.check(&StudentId(student_id), &CourseId(course_id)) {
        Ok(eligibility) => (StatusCode::OK, axum::Json(eligibility.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn catalogue_handler<T, C>(
    State(service): State<Arc<EligibilityService<T, C>>>,
    Path(student_id): Path<String>,
) -> Response
where
    T: TranscriptRepository + 'static,
    C: CourseRepository + 'static,
{
    match service.eligible_courses(&StudentId(student_id)) {
        Ok(evaluations) => {
            let views: Vec<EligibilityView> =
                evaluations.iter().map(|evaluation| evaluation.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: EligibilityServiceError) -> Response {
    let status = match error {
        EligibilityServiceError::CourseNotFound(_) => StatusCode::NOT_FOUND,
        EligibilityServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
