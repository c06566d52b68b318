use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use tracing::{info, warn};

use super::runner::ScheduledTick;
use super::tick::{compute_tick, JobMatchSnapshot};
use crate::workflows::clock::Clock;
use crate::workflows::matching::{JobRepository, PreferenceRepository};
use crate::workflows::notifications::{NotificationRecord, NotificationRepository};
use crate::workflows::repository::RepositoryError;

/// Outcome of one job-matcher tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMatchReport {
    pub jobs_scanned: usize,
    pub notifications_created: usize,
    pub failed_writes: usize,
    pub scan_failed: bool,
    pub watermark: DateTime<Utc>,
}

/// Polls for newly posted jobs and notifies students they match.
pub struct JobMatcher<J, P, N> {
    jobs: Arc<J>,
    preferences: Arc<P>,
    notifications: Arc<N>,
    clock: Arc<dyn Clock>,
    last_check: Mutex<DateTime<Utc>>,
}

impl<J, P, N> JobMatcher<J, P, N>
where
    J: JobRepository + 'static,
    P: PreferenceRepository + 'static,
    N: NotificationRepository + 'static,
{
    /// Jobs posted before construction are never matched.
    pub fn new(jobs: Arc<J>, preferences: Arc<P>, notifications: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        let watermark = clock.now();
        Self::with_watermark(jobs, preferences, notifications, clock, watermark)
    }

    pub fn with_watermark(
        jobs: Arc<J>,
        preferences: Arc<P>,
        notifications: Arc<N>,
        clock: Arc<dyn Clock>,
        watermark: DateTime<Utc>,
    ) -> Self {
        Self {
            jobs,
            preferences,
            notifications,
            clock,
            last_check: Mutex::new(watermark),
        }
    }

    pub fn last_check(&self) -> DateTime<Utc> {
        *self
            .last_check
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn advance(&self, watermark: DateTime<Utc>) {
        *self
            .last_check
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = watermark;
    }

    fn snapshot(&self, since: DateTime<Utc>) -> Result<JobMatchSnapshot, RepositoryError> {
        let jobs = self.jobs.active_posted_since(since)?;
        let preferences = if jobs.is_empty() {
            Vec::new()
        } else {
            self.preferences.all()?
        };
        Ok(JobMatchSnapshot {
            since: Some(since),
            jobs,
            preferences,
        })
    }

    /// Run one scan. The watermark moves to this tick's `now` even when the
    /// scan fails, so a failed tick's jobs are dropped rather than retried.
    pub async fn run_tick(&self) -> JobMatchReport {
        let now = self.clock.now();
        let since = self.last_check();

        let mut report = JobMatchReport {
            jobs_scanned: 0,
            notifications_created: 0,
            failed_writes: 0,
            scan_failed: false,
            watermark: now,
        };

        match self.snapshot(since) {
            Ok(snapshot) => {
                report.jobs_scanned = snapshot.jobs.len();
                let tick = compute_tick(now, &snapshot);
                report.watermark = tick.next_watermark;
                let (created, failed) = self.persist(tick.notifications).await;
                report.notifications_created = created;
                report.failed_writes = failed;
            }
            Err(error) => {
                warn!(%since, %error, "job match scan failed");
                report.scan_failed = true;
            }
        }

        self.advance(report.watermark);
        info!(
            jobs = report.jobs_scanned,
            notified = report.notifications_created,
            failed = report.failed_writes,
            "job match tick complete"
        );
        report
    }

    /// One task per job, awaited together. Returns (created, failed).
    async fn persist(&self, notifications: Vec<NotificationRecord>) -> (usize, usize) {
        let mut per_job: BTreeMap<String, Vec<NotificationRecord>> = BTreeMap::new();
        for record in notifications {
            let job = record.related_id.clone().unwrap_or_default();
            per_job.entry(job).or_default().push(record);
        }

        let mut writes = JoinSet::new();
        for (job, records) in per_job {
            let store = self.notifications.clone();
            writes.spawn(async move {
                let mut created = 0usize;
                let mut failed = 0usize;
                for record in records {
                    let student = record.user_id.clone();
                    match store.insert(record) {
                        Ok(_) => created += 1,
                        Err(error) => {
                            warn!(%job, %student, %error, "job match notification not stored");
                            failed += 1;
                        }
                    }
                }
                (created, failed)
            });
        }

        let mut totals = (0usize, 0usize);
        while let Some(joined) = writes.join_next().await {
            match joined {
                Ok((created, failed)) => {
                    totals.0 += created;
                    totals.1 += failed;
                }
                Err(error) => {
                    warn!(%error, "job match notification task aborted");
                    totals.1 += 1;
                }
            }
        }
        totals
    }
}

impl<J, P, N> ScheduledTick for JobMatcher<J, P, N>
where
    J: JobRepository + 'static,
    P: PreferenceRepository + 'static,
    N: NotificationRepository + 'static,
{
    fn name(&self) -> &'static str {
        "job_matcher"
    }

    fn tick(&self) -> impl Future<Output = ()> + Send {
        async move {
            self.run_tick().await;
        }
    }
}
