use cgeip::seed::{SeedData, SeedError};
use cgeip::workflows::eligibility::{
    Course, CourseId, CourseRepository, Transcript, TranscriptRepository,
};
use cgeip::workflows::matching::{
    JobId, JobPosting, JobPreference, JobRepository, PreferenceRepository,
};
use cgeip::workflows::notifications::{
    EmailMessage, MailError, Mailer, NotificationId, NotificationKind, NotificationRecord,
    NotificationRepository,
};
use cgeip::workflows::repository::RepositoryError;
use cgeip::workflows::students::{StudentAccount, StudentId, StudentRepository};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTranscripts {
    records: Arc<Mutex<HashMap<StudentId, Transcript>>>,
}

impl TranscriptRepository for InMemoryTranscripts {
    fn fetch(&self, student_id: &StudentId) -> Result<Option<Transcript>, RepositoryError> {
        let guard = self.records.lock().expect("transcript mutex poisoned");
        Ok(guard.get(student_id).cloned())
    }

    fn replace(&self, transcript: Transcript) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("transcript mutex poisoned");
        guard.insert(transcript.student_id.clone(), transcript);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCourses {
    records: Arc<Mutex<BTreeMap<CourseId, Course>>>,
}

impl InMemoryCourses {
    pub(crate) fn insert(&self, course: Course) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("course mutex poisoned");
        if guard.contains_key(&course.course_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(course.course_id.clone(), course);
        Ok(())
    }
}

impl CourseRepository for InMemoryCourses {
    fn fetch(&self, course_id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        let guard = self.records.lock().expect("course mutex poisoned");
        Ok(guard.get(course_id).cloned())
    }

    fn list(&self) -> Result<Vec<Course>, RepositoryError> {
        let guard = self.records.lock().expect("course mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobs {
    records: Arc<Mutex<BTreeMap<JobId, JobPosting>>>,
}

impl JobRepository for InMemoryJobs {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        if guard.contains_key(&job.job_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.job_id.clone(), job.clone());
        Ok(job)
    }

    fn fetch(&self, job_id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.get(job_id).cloned())
    }

    fn active(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.values().filter(|job| job.is_active()).cloned().collect())
    }

    fn active_posted_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard
            .values()
            .filter(|job| job.is_active() && job.posted_at.is_some_and(|at| at > since))
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPreferences {
    records: Arc<Mutex<HashMap<StudentId, JobPreference>>>,
}

impl PreferenceRepository for InMemoryPreferences {
    fn fetch(&self, student_id: &StudentId) -> Result<Option<JobPreference>, RepositoryError> {
        let guard = self.records.lock().expect("preference mutex poisoned");
        Ok(guard.get(student_id).cloned())
    }

    fn all(&self) -> Result<Vec<JobPreference>, RepositoryError> {
        let guard = self.records.lock().expect("preference mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn upsert(&self, preference: JobPreference) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("preference mutex poisoned");
        guard.insert(preference.student_id.clone(), preference);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryStudents {
    accounts: Arc<Mutex<Vec<StudentAccount>>>,
}

impl InMemoryStudents {
    pub(crate) fn register(&self, account: StudentAccount) {
        self.accounts
            .lock()
            .expect("student mutex poisoned")
            .push(account);
    }
}

impl StudentRepository for InMemoryStudents {
    fn registered_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<StudentAccount>, RepositoryError> {
        let guard = self.accounts.lock().expect("student mutex poisoned");
        Ok(guard
            .iter()
            .filter(|account| account.created_at <= cutoff)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotifications {
    records: Arc<Mutex<Vec<NotificationRecord>>>,
}

impl NotificationRepository for InMemoryNotifications {
    fn insert(&self, mut record: NotificationRecord) -> Result<NotificationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("notification mutex poisoned");
        if record.notification_id.is_unassigned() {
            record.notification_id = NotificationId(format!("ntf-{:06}", guard.len() + 1));
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

/// Mailer that records outbound mail in the log instead of delivering it.
#[derive(Default, Clone)]
pub(crate) struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        if message.to.trim().is_empty() {
            return Err(MailError::MissingRecipient);
        }
        info!(to = %message.to, subject = %message.subject, "email queued");
        Ok(())
    }
}

/// Every store the service wires together.
#[derive(Default, Clone)]
pub(crate) struct Stores {
    pub(crate) transcripts: Arc<InMemoryTranscripts>,
    pub(crate) courses: Arc<InMemoryCourses>,
    pub(crate) jobs: Arc<InMemoryJobs>,
    pub(crate) preferences: Arc<InMemoryPreferences>,
    pub(crate) students: Arc<InMemoryStudents>,
    pub(crate) notifications: Arc<InMemoryNotifications>,
}

impl Stores {
    pub(crate) fn seeded(seed: SeedData) -> Result<Self, SeedError> {
        let stores = Self::default();
        let SeedData {
            students,
            transcripts,
            courses,
            jobs,
            preferences,
        } = seed;

        info!(
            students = students.len(),
            courses = courses.len(),
            jobs = jobs.len(),
            "seeding in-memory stores"
        );

        for account in students {
            stores.students.register(account);
        }
        for transcript in transcripts {
            stores.transcripts.replace(transcript)?;
        }
        for course in courses {
            stores.courses.insert(course)?;
        }
        for job in jobs {
            stores.jobs.insert(job)?;
        }
        for preference in preferences {
            stores.preferences.upsert(preference)?;
        }
        Ok(stores)
    }
}
