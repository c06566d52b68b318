use chrono::{DateTime, Utc};
use serde::Serialize;

use super::criteria::MatchResult;
use super::domain::{JobId, JobPosting, JobPreference};
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::StudentId;

/// Storage abstraction for company job postings.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError>;
    fn fetch(&self, job_id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    fn active(&self) -> Result<Vec<JobPosting>, RepositoryError>;
    /// Active jobs whose `posted_at` is strictly after `since`.
    ///
    /// `posted_at` is stamped before `insert` runs, so a job stored after a
    /// tick has read its `now` but before this query returns can carry a
    /// `posted_at` at or below that tick's watermark and is never matched.
    /// Implementations backed by a real database should stamp `posted_at`
    /// in the same statement as the insert.
    fn active_posted_since(&self, since: DateTime<Utc>)
        -> Result<Vec<JobPosting>, RepositoryError>;
}

/// Storage abstraction for the one preference record per student.
pub trait PreferenceRepository: Send + Sync {
    fn fetch(&self, student_id: &StudentId) -> Result<Option<JobPreference>, RepositoryError>;
    fn all(&self) -> Result<Vec<JobPreference>, RepositoryError>;
    fn upsert(&self, preference: JobPreference) -> Result<(), RepositoryError>;
}

/// A job as seen by one student, with its match breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct JobMatchView {
    pub job_id: JobId,
    pub title: String,
    pub company_id: String,
    pub location: String,
    pub is_match: bool,
    pub score: u8,
    pub matched: Vec<&'static str>,
    pub summary: String,
}

impl JobMatchView {
    pub fn new(job: &JobPosting, result: &MatchResult) -> Self {
        Self {
            job_id: job.job_id.clone(),
            title: job.title.clone(),
            company_id: job.company_id.clone(),
            location: job.location.clone(),
            is_match: result.is_match,
            score: result.score,
            matched: result.matched.iter().map(|criterion| criterion.label()).collect(),
            summary: result.summary(),
        }
    }
}
