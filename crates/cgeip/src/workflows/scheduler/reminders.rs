use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::runner::ScheduledTick;
use crate::workflows::clock::Clock;
use crate::workflows::matching::PreferenceRepository;
use crate::workflows::notifications::{
    EmailMessage, Mailer, NotificationKind, NotificationRecord, NotificationRepository,
};
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::{StudentAccount, StudentId, StudentRepository};

pub const REMINDER_TITLE: &str = "Set your job preferences";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPolicy {
    /// Minimum gap between two reminders to the same student.
    pub cooldown: Duration,
    /// Accounts younger than this are left alone.
    pub min_account_age: Duration,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            cooldown: Duration::hours(72),
            min_account_age: Duration::hours(24),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderReport {
    pub scanned: usize,
    pub reminded: usize,
    pub has_preferences: usize,
    pub cooling_down: usize,
    pub already_unread: usize,
    pub emails_failed: usize,
    pub failures: usize,
}

/// Nudges students who registered but never set job preferences.
///
/// Cooldowns live in memory only, so a restart forgets them.
pub struct PreferenceReminder<S, P, N, M> {
    students: Arc<S>,
    preferences: Arc<P>,
    notifications: Arc<N>,
    mailer: Arc<M>,
    clock: Arc<dyn Clock>,
    policy: ReminderPolicy,
    last_reminded: Mutex<HashMap<StudentId, DateTime<Utc>>>,
}

enum Skip {
    HasPreferences,
    CoolingDown,
    AlreadyUnread,
}

impl<S, P, N, M> PreferenceReminder<S, P, N, M>
where
    S: StudentRepository + 'static,
    P: PreferenceRepository + 'static,
    N: NotificationRepository + 'static,
    M: Mailer + 'static,
{
    pub fn new(
        students: Arc<S>,
        preferences: Arc<P>,
        notifications: Arc<N>,
        mailer: Arc<M>,
        clock: Arc<dyn Clock>,
        policy: ReminderPolicy,
    ) -> Self {
        Self {
            students,
            preferences,
            notifications,
            mailer,
            clock,
            policy,
            last_reminded: Mutex::new(HashMap::new()),
        }
    }

    pub fn last_reminded(&self, student_id: &StudentId) -> Option<DateTime<Utc>> {
        self.last_reminded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(student_id)
            .copied()
    }

    fn cooling_down(&self, student_id: &StudentId, now: DateTime<Utc>) -> bool {
        self.last_reminded(student_id)
            .is_some_and(|at| now - at < self.policy.cooldown)
    }

    fn remember(&self, student_id: &StudentId, now: DateTime<Utc>) {
        self.last_reminded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(student_id.clone(), now);
    }

    fn skip_reason(
        &self,
        student: &StudentAccount,
        now: DateTime<Utc>,
    ) -> Result<Option<Skip>, RepositoryError> {
        let preference = self.preferences.fetch(&student.student_id)?;
        if preference.is_some_and(|preference| !preference.is_empty()) {
            return Ok(Some(Skip::HasPreferences));
        }
        if self.cooling_down(&student.student_id, now) {
            return Ok(Some(Skip::CoolingDown));
        }
        if self
            .notifications
            .has_unread(&student.student_id, NotificationKind::PreferenceReminder)?
        {
            return Ok(Some(Skip::AlreadyUnread));
        }
        Ok(None)
    }

    /// Scan eligible students once. Failures are isolated per student.
    pub fn run_tick(&self) -> ReminderReport {
        let now = self.clock.now();
        let cutoff = now - self.policy.min_account_age;
        let mut report = ReminderReport::default();

        let students = match self.students.registered_before(cutoff) {
            Ok(students) => students,
            Err(error) => {
                warn!(%cutoff, %error, "preference reminder scan failed");
                report.failures += 1;
                return report;
            }
        };

        for student in students {
            report.scanned += 1;
            match self.skip_reason(&student, now) {
                Ok(Some(Skip::HasPreferences)) => report.has_preferences += 1,
                Ok(Some(Skip::CoolingDown)) => report.cooling_down += 1,
                Ok(Some(Skip::AlreadyUnread)) => report.already_unread += 1,
                Ok(None) => self.remind(&student, now, &mut report),
                Err(error) => {
                    warn!(student = %student.student_id, %error, "preference reminder check failed");
                    report.failures += 1;
                }
            }
        }

        info!(
            scanned = report.scanned,
            reminded = report.reminded,
            failures = report.failures,
            "preference reminder tick complete"
        );
        report
    }

    fn remind(&self, student: &StudentAccount, now: DateTime<Utc>, report: &mut ReminderReport) {
        if let Err(error) = self.notifications.insert(reminder_notification(student, now)) {
            warn!(student = %student.student_id, %error, "preference reminder not stored");
            report.failures += 1;
            return;
        }
        self.remember(&student.student_id, now);
        report.reminded += 1;

        match self.mailer.send(reminder_email(student)) {
            Ok(()) => debug!(student = %student.student_id, "preference reminder emailed"),
            Err(error) => {
                warn!(student = %student.student_id, %error, "preference reminder email failed");
                report.emails_failed += 1;
            }
        }
    }
}

pub fn reminder_notification(student: &StudentAccount, now: DateTime<Utc>) -> NotificationRecord {
    NotificationRecord::unread(
        student.student_id.clone(),
        NotificationKind::PreferenceReminder,
        REMINDER_TITLE,
        "Tell us the industries, skills and work types you are after so we can match you with new jobs.",
        now,
    )
}

pub fn reminder_email(student: &StudentAccount) -> EmailMessage {
    let greeting = if student.display_name.trim().is_empty() {
        "Hi".to_string()
    } else {
        format!("Hi {}", student.display_name.trim())
    };
    EmailMessage {
        to: student.email.clone(),
        subject: REMINDER_TITLE.to_string(),
        body: format!(
            "{greeting},\n\nYou have not set any job preferences yet. \
             Add them to your profile and we will notify you when a matching job is posted."
        ),
    }
}

impl<S, P, N, M> ScheduledTick for PreferenceReminder<S, P, N, M>
where
    S: StudentRepository + 'static,
    P: PreferenceRepository + 'static,
    N: NotificationRepository + 'static,
    M: Mailer + 'static,
{
    fn name(&self) -> &'static str {
        "preference_reminder"
    }

    fn tick(&self) -> impl Future<Output = ()> + Send {
        async move {
            self.run_tick();
        }
    }
}
