use crate::infra::{
    AppState, InMemoryCourses, InMemoryJobs, InMemoryPreferences, InMemoryTranscripts, Stores,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use axum::Router;
use cgeip::workflows::eligibility::{eligibility_router, EligibilityService};
use cgeip::workflows::matching::{matching_router, JobMatchService};
use cgeip::workflows::notifications::notification_router;
use serde_json::json;
use std::sync::Arc;

pub(crate) type Eligibility = EligibilityService<InMemoryTranscripts, InMemoryCourses>;
pub(crate) type Matching = JobMatchService<InMemoryJobs, InMemoryPreferences>;

pub(crate) fn with_workflow_routes(
    eligibility: Arc<Eligibility>,
    matching: Arc<Matching>,
    stores: &Stores,
) -> Router {
    eligibility_router(eligibility)
        .merge(matching_router(matching))
        .merge(notification_router(stores.notifications.clone()))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
