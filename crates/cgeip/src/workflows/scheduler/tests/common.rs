use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::workflows::clock::ManualClock;
use crate::workflows::matching::{JobId, JobPosting, JobPreference, JobRepository, JobStatus, PreferenceRepository};
use crate::workflows::notifications::{
    EmailMessage, MailError, Mailer, NotificationId, NotificationKind, NotificationRecord,
    NotificationRepository,
};
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::{StudentAccount, StudentId, StudentRepository};

pub(super) fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn terms(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn job(id: &str, posted_at: DateTime<Utc>) -> JobPosting {
    JobPosting {
        job_id: JobId(id.to_string()),
        company_id: "co-standard-lesotho".to_string(),
        title: "Graduate Analyst".to_string(),
        industries: terms(&["banking"]),
        skills: terms(&["excel", "sql"]),
        work_type: terms(&["hybrid"]),
        location: "Maseru".to_string(),
        status: JobStatus::Active,
        posted_at: Some(posted_at),
    }
}

pub(super) fn preference(student: &str) -> JobPreference {
    JobPreference {
        student_id: StudentId(student.to_string()),
        industries: terms(&["finance"]),
        skills: terms(&["postgresql"]),
        work_type: Vec::new(),
        location: Some("maseru".to_string()),
        salary_min: None,
        salary_max: None,
    }
}

pub(super) fn unrelated_preference(student: &str) -> JobPreference {
    JobPreference {
        student_id: StudentId(student.to_string()),
        industries: terms(&["healthcare"]),
        skills: terms(&["nursing"]),
        work_type: terms(&["on-site"]),
        location: Some("Johannesburg".to_string()),
        salary_min: None,
        salary_max: None,
    }
}

pub(super) fn account(id: &str, created_at: DateTime<Utc>) -> StudentAccount {
    StudentAccount {
        student_id: StudentId(id.to_string()),
        email: format!("{id}@students.example.org"),
        display_name: "Lerato".to_string(),
        created_at,
    }
}

fn offline() -> RepositoryError {
    RepositoryError::Unavailable("store offline".to_string())
}

#[derive(Default, Clone)]
pub(super) struct MemoryJobs {
    records: Arc<Mutex<Vec<JobPosting>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryJobs {
    pub(super) fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl JobRepository for MemoryJobs {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        self.records
            .lock()
            .expect("job mutex poisoned")
            .push(job.clone());
        Ok(job)
    }

    fn fetch(&self, job_id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.iter().find(|job| &job.job_id == job_id).cloned())
    }

    fn active(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.iter().filter(|job| job.is_active()).cloned().collect())
    }

    fn active_posted_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<JobPosting>, RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(offline());
        }
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard
            .iter()
            .filter(|job| job.is_active() && job.posted_at.is_some_and(|at| at > since))
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryPreferences {
    records: Arc<Mutex<HashMap<StudentId, JobPreference>>>,
}

impl PreferenceRepository for MemoryPreferences {
    fn fetch(&self, student_id: &StudentId) -> Result<Option<JobPreference>, RepositoryError> {
        let guard = self.records.lock().expect("preference mutex poisoned");
        Ok(guard.get(student_id).cloned())
    }

    fn all(&self) -> Result<Vec<JobPreference>, RepositoryError> {
        let guard = self.records.lock().expect("preference mutex poisoned");
        let mut all: Vec<JobPreference> = guard.values().cloned().collect();
        all.sort_by(|left, right| left.student_id.cmp(&right.student_id));
        Ok(all)
    }

    fn upsert(&self, preference: JobPreference) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("preference mutex poisoned");
        guard.insert(preference.student_id.clone(), preference);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    records: Arc<Mutex<Vec<NotificationRecord>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryNotifications {
    pub(super) fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(super) fn all(&self) -> Vec<NotificationRecord> {
        self.records
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }

    pub(super) fn of_kind(&self, kind: NotificationKind) -> Vec<NotificationRecord> {
        self.all()
            .into_iter()
            .filter(|record| record.kind == kind)
            .collect()
    }

    pub(super) fn mark_all_read(&self) {
        let mut guard = self.records.lock().expect("notification mutex poisoned");
        for record in guard.iter_mut() {
            record.read = true;
        }
    }
}

impl NotificationRepository for MemoryNotifications {
    fn insert(&self, mut record: NotificationRecord) -> Result<NotificationRecord, RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(offline());
        }
        let mut guard = self.records.lock().expect("notification mutex poisoned");
        record.notification_id = NotificationId(format!("ntf-{}", guard.len() + 1));
        guard.push(record.clone());
        Ok(record)
    }

    fn for_user(&self, user_id: &StudentId) -> Result<Vec<NotificationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("notification mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect())
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

#[derive(Default, Clone)]
pub(super) struct MemoryStudents {
    accounts: Arc<Mutex<Vec<StudentAccount>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStudents {
    pub(super) fn with(accounts: Vec<StudentAccount>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
            failing: Arc::default(),
        }
    }

    pub(super) fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl StudentRepository for MemoryStudents {
    fn registered_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<StudentAccount>, RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(offline());
        }
        let guard = self.accounts.lock().expect("student mutex poisoned");
        Ok(guard
            .iter()
            .filter(|account| account.created_at <= cutoff)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingMailer {
    pub(super) fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(super) fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Transport("smtp relay refused".to_string()));
        }
        self.sent.lock().expect("mailer mutex poisoned").push(message);
        Ok(())
    }
}

pub(super) fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(start_time()))
}

pub(super) fn minutes(count: i64) -> Duration {
    Duration::minutes(count)
}
