use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::clock::ManualClock;
use crate::workflows::matching::domain::{JobId, JobPosting, JobPreference, JobStatus};
use crate::workflows::matching::repository::{JobRepository, PreferenceRepository};
use crate::workflows::matching::JobMatchService;
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::StudentId;

pub(super) fn terms(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn fintech_job() -> JobPosting {
    JobPosting {
        job_id: JobId("job-fintech".to_string()),
        company_id: "co-vodacom".to_string(),
        title: "Backend Engineer".to_string(),
        industries: terms(&["fintech"]),
        skills: terms(&["python"]),
        work_type: terms(&["remote"]),
        location: "Remote".to_string(),
        status: JobStatus::Active,
        posted_at: Some(start_time()),
    }
}

pub(super) fn clinic_job() -> JobPosting {
    JobPosting {
        job_id: JobId("job-clinic".to_string()),
        company_id: "co-clinic".to_string(),
        title: "Clinic Receptionist".to_string(),
        industries: terms(&["healthcare"]),
        skills: terms(&["figma"]),
        work_type: terms(&["on-site"]),
        location: "Maseru".to_string(),
        status: JobStatus::Active,
        posted_at: Some(start_time()),
    }
}

pub(super) fn finance_preference() -> JobPreference {
    JobPreference {
        student_id: StudentId("stu-001".to_string()),
        industries: terms(&["finance"]),
        skills: terms(&["java"]),
        work_type: terms(&["remote"]),
        location: Some("remote".to_string()),
        salary_min: Some(12_000),
        salary_max: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryJobs {
    records: Arc<Mutex<Vec<JobPosting>>>,
}

impl JobRepository for MemoryJobs {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        if guard.iter().any(|existing| existing.job_id == job.job_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(job.clone());
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
        Ok(guard.values().cloned().collect())
    }

    fn upsert(&self, preference: JobPreference) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("preference mutex poisoned");
        guard.insert(preference.student_id.clone(), preference);
        Ok(())
    }
}

pub(super) fn build_service() -> (
    JobMatchService<MemoryJobs, MemoryPreferences>,
    Arc<MemoryJobs>,
    Arc<MemoryPreferences>,
    Arc<ManualClock>,
) {
    let jobs = Arc::new(MemoryJobs::default());
    let preferences = Arc::new(MemoryPreferences::default());
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = JobMatchService::new(jobs.clone(), preferences.clone(), clock.clone());
    (service, jobs, preferences, clock)
}
