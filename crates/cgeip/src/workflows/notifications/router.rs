use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::NotificationRecord;
use super::repository::NotificationRepository;
use crate::workflows::students::StudentId;

#[derive(Debug, Serialize)]
pub struct InboxView {
    pub user_id: StudentId,
    pub unread: usize,
    pub notifications: Vec<NotificationRecord>,
}

/// Router builder exposing a user's notification inbox.
pub fn notification_router<N>(notifications: Arc<N>) -> Router
where
    N: NotificationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/users/:user_id/notifications",
            get(inbox_handler::<N>),
        )
        .with_state(notifications)
}

pub(crate) async fn inbox_handler<N>(
    State(notifications): State<Arc<N>>,
    Path(user_id): Path<String>,
) -> Response
where
    N: NotificationRepository + 'static,
{
    let user_id = StudentId(user_id);
    match notifications.for_user(&user_id) {
        Ok(records) => {
            let unread = records.iter().filter(|record| !record.read).count();
            let view = InboxView {
                user_id,
                unread,
                notifications: records,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
