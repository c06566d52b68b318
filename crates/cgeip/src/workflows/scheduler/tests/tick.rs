use super::common::*;
use crate::workflows::matching::JobStatus;
use crate::workflows::notifications::NotificationKind;
use crate::workflows::scheduler::{compute_tick, match_job, JobMatchSnapshot};

#[test]
fn tick_notifies_each_matching_student_once_per_job() {
    let now = start_time() + minutes(5);
    let snapshot = JobMatchSnapshot {
        since: Some(start_time()),
        jobs: vec![job("job-1", start_time() + minutes(1)), job("job-2", start_time() + minutes(2))],
        preferences: vec![preference("stu-a"), unrelated_preference("stu-b")],
    };

    let tick = compute_tick(now, &snapshot);

    assert_eq!(tick.next_watermark, now);
    assert_eq!(tick.notifications.len(), 2);
    for record in &tick.notifications {
        assert_eq!(record.user_id.0, "stu-a");
        assert_eq!(record.kind, NotificationKind::JobMatch);
        assert_eq!(record.title, "New Job Match");
        assert!(!record.read);
        assert_eq!(record.created_at, now);
    }
    let related: Vec<_> = tick
        .notifications
        .iter()
        .filter_map(|record| record.related_id.as_deref())
        .collect();
    assert_eq!(related, vec!["job-1", "job-2"]);
}

#[test]
fn tick_ignores_jobs_at_or_before_the_watermark() {
    let snapshot = JobMatchSnapshot {
        since: Some(start_time()),
        jobs: vec![job("job-old", start_time()), job("job-older", start_time() - minutes(30))],
        preferences: vec![preference("stu-a")],
    };

    let tick = compute_tick(start_time() + minutes(5), &snapshot);
    assert!(tick.notifications.is_empty());
}

#[test]
fn tick_skips_closed_and_undated_jobs() {
    let mut closed = job("job-closed", start_time() + minutes(1));
    closed.status = JobStatus::Closed;
    let mut undated = job("job-undated", start_time() + minutes(1));
    undated.posted_at = None;

    let snapshot = JobMatchSnapshot {
        since: Some(start_time()),
        jobs: vec![closed, undated],
        preferences: vec![preference("stu-a")],
    };

    let tick = compute_tick(start_time() + minutes(5), &snapshot);
    assert!(tick.notifications.is_empty());
}

#[test]
fn empty_snapshot_still_moves_the_watermark() {
    let now = start_time() + minutes(5);
    let tick = compute_tick(now, &JobMatchSnapshot::default());

    assert!(tick.notifications.is_empty());
    assert_eq!(tick.next_watermark, now);
}

#[test]
fn match_job_message_names_job_and_score() {
    let records = match_job(&job("job-1", start_time()), &[preference("stu-a")], start_time());

    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].message,
        "A new job \"Graduate Analyst\" matches your preferences (75% match)."
    );
}

#[test]
fn match_job_skips_preferences_without_owner() {
    let records = match_job(&job("job-1", start_time()), &[preference("  ")], start_time());
    assert!(records.is_empty());
}
