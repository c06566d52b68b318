use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::workflows::notifications::domain::{
    NotificationId, NotificationKind, NotificationRecord,
};
use crate::workflows::notifications::repository::NotificationRepository;
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::StudentId;

pub(super) fn student() -> StudentId {
    StudentId("stu-001".to_string())
}

pub(super) fn at(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::hours(hours)
}

pub(super) fn job_match(hours: i64) -> NotificationRecord {
    NotificationRecord::unread(
        student(),
        NotificationKind::JobMatch,
        "New Job Match",
        "A new job \"Backend Engineer\" matches your preferences (100% match).",
        at(hours),
    )
    .related_to("job-fintech")
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    records: Arc<Mutex<Vec<NotificationRecord>>>,
}

impl NotificationRepository for MemoryNotifications {
    fn insert(&self, mut record: NotificationRecord) -> Result<NotificationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("notification mutex poisoned");
        if record.notification_id.is_unassigned() {
            record.notification_id = NotificationId(format!("ntf-{}", guard.len() + 1));
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn for_user(&self, user_id: &StudentId) -> Result<Vec<NotificationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("notification mutex poisoned");
        let mut records: Vec<NotificationRecord> = guard
            .iter()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(records)
    }

    fn has_unread(
        &self,
        user_id: &StudentId,
        kind: NotificationKind,
    ) -> Result<bool, RepositoryError> {
        let guard = self.records.lock().expect("notification mutex poisoned");
        Ok(guard
            .iter()
            .any(|record| &record.user_id == user_id && record.kind == kind && !record.read))
    }
}

pub(super) struct BrokenNotifications;

impl NotificationRepository for BrokenNotifications {
    fn insert(&self, _record: NotificationRecord) -> Result<NotificationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("notifications offline".to_string()))
    }

    fn for_user(&self, _user_id: &StudentId) -> Result<Vec<NotificationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("notifications offline".to_string()))
    }

    fn has_unread(
        &self,
        _user_id: &StudentId,
        _kind: NotificationKind,
    ) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("notifications offline".to_string()))
    }
}
