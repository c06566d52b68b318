use chrono::{DateTime, Utc};

use crate::workflows::matching::{score_match, JobPosting, JobPreference, MatchResult};
use crate::workflows::notifications::{NotificationKind, NotificationRecord};

pub const JOB_MATCH_TITLE: &str = "New Job Match";

/// Everything one job-matcher tick reads from the stores.
#[derive(Debug, Clone, Default)]
pub struct JobMatchSnapshot {
    /// Watermark the jobs were queried with; jobs at or before it are ignored.
    pub since: Option<DateTime<Utc>>,
    pub jobs: Vec<JobPosting>,
    pub preferences: Vec<JobPreference>,
}

/// Notifications a tick should write and where the next tick resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMatchTick {
    pub notifications: Vec<NotificationRecord>,
    pub next_watermark: DateTime<Utc>,
}

/// Pure tick body: match every new active job against every stored preference.
pub fn compute_tick(now: DateTime<Utc>, snapshot: &JobMatchSnapshot) -> JobMatchTick {
    let notifications = snapshot
        .jobs
        .iter()
        .filter(|job| is_new(job, snapshot.since, now))
        .flat_map(|job| match_job(job, &snapshot.preferences, now))
        .collect();

    JobMatchTick {
        notifications,
        next_watermark: now,
    }
}

fn is_new(job: &JobPosting, since: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    if !job.is_active() {
        return false;
    }
    match (job.posted_at, since) {
        (Some(posted), Some(since)) => posted > since && posted <= now,
        (Some(posted), None) => posted <= now,
        (None, _) => false,
    }
}

/// One notification per student whose preferences match the job.
pub fn match_job(
    job: &JobPosting,
    preferences: &[JobPreference],
    now: DateTime<Utc>,
) -> Vec<NotificationRecord> {
    preferences
        .iter()
        .filter(|preference| !preference.student_id.0.trim().is_empty())
        .filter_map(|preference| {
            let result = score_match(job, preference);
            result
                .is_match
                .then(|| job_match_notification(job, preference, &result, now))
        })
        .collect()
}

pub fn job_match_notification(
    job: &JobPosting,
    preference: &JobPreference,
    result: &MatchResult,
    now: DateTime<Utc>,
) -> NotificationRecord {
    let message = format!(
        "A new job \"{}\" matches your preferences ({}% match).",
        job.title, result.score
    );
    NotificationRecord::unread(
        preference.student_id.clone(),
        NotificationKind::JobMatch,
        JOB_MATCH_TITLE,
        message,
        now,
    )
    .related_to(job.job_id.0.clone())
}
