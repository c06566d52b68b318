use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use super::criteria::{score_match, MatchResult};
use super::domain::{JobId, JobPosting, JobPreference, JobStatus};
use super::repository::{JobMatchView, JobRepository, PreferenceRepository};
use crate::workflows::clock::Clock;
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::StudentId;

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Generated ids skipped before an auto-assigned publish gives up.
const MAX_ID_ATTEMPTS: usize = 1024;

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

/// Service composing the job store, preference store and matcher.
pub struct JobMatchService<J, P> {
    jobs: Arc<J>,
    preferences: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<J, P> JobMatchService<J, P>
where
    J: JobRepository + 'static,
    P: PreferenceRepository + 'static,
{
    pub fn new(jobs: Arc<J>, preferences: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            jobs,
            preferences,
            clock,
        }
    }

    /// Store a new posting so the next job-matcher tick picks it up.
    ///
    /// A blank `job_id` gets a generated one; generated ids already taken
    /// in the store (for example by seeded jobs) are skipped. A conflict on
    /// a caller-supplied id is returned as is.
    pub fn publish(&self, mut job: JobPosting) -> Result<JobPosting, MatchServiceError> {
        let generated = job.job_id.0.trim().is_empty();
        job.status = JobStatus::Active;
        job.posted_at = Some(self.clock.now());

        if !generated {
            let stored = self.jobs.insert(job)?;
            info!(job = %stored.job_id, company = %stored.company_id, "job posted");
            return Ok(stored);
        }

        for _ in 0..MAX_ID_ATTEMPTS {
            job.job_id = next_job_id();
            match self.jobs.insert(job.clone()) {
                Ok(stored) => {
                    info!(job = %stored.job_id, company = %stored.company_id, "job posted");
                    return Ok(stored);
                }
                Err(RepositoryError::Conflict) => {
                    debug!(job = %job.job_id, "generated job id taken, retrying");
                }
                Err(error) => return Err(error.into()),
            }
        }
        Err(RepositoryError::Conflict.into())
    }

    /// Score one stored job against one student's stored preferences.
    pub fn score(
        &self,
        job_id: &JobId,
        student_id: &StudentId,
    ) -> Result<(JobPosting, MatchResult), MatchServiceError> {
        let job = self
            .jobs
            .fetch(job_id)?
            .ok_or_else(|| MatchServiceError::JobNotFound(job_id.clone()))?;
        let preference = self.preferences.fetch(student_id)?.unwrap_or_default();

        let result = score_match(&job, &preference);
        Ok((job, result))
    }

    /// Active jobs matching the student's preferences, best score first.
    pub fn matches_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<JobMatchView>, MatchServiceError> {
        let Some(preference) = self.preferences.fetch(student_id)? else {
            debug!(student = %student_id, "no job preferences stored");
            return Ok(Vec::new());
        };

        let mut matches = rank_jobs(&self.jobs.active()?, &preference);
        matches.retain(|view| view.is_match);
        Ok(matches)
    }
}

/// Score every job against one preference, best first and ties by title.
pub fn rank_jobs(jobs: &[JobPosting], preference: &JobPreference) -> Vec<JobMatchView> {
    let mut views: Vec<JobMatchView> = jobs
        .iter()
        .map(|job| JobMatchView::new(job, &score_match(job, preference)))
        .collect();
    views.sort_by(|left, right| {
        right
            .score
            .cmp(&left.score)
            .then_with(|| left.title.cmp(&right.title))
    });
    views
}

/// Error raised by the job match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
