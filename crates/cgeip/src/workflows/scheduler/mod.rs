//! Background schedulers: the job matcher polls for new postings on a minutes
//! scale and the preference reminder nudges students on an hours scale.
//!
//! Both are plain structs over injected stores and a [`Clock`], wrapped by a
//! [`PeriodicTask`] that owns the timer.
//!
//! [`Clock`]: crate::workflows::clock::Clock

pub mod job_matcher;
pub mod reminders;
pub mod runner;
pub mod tick;

#[cfg(test)]
mod tests;

pub use job_matcher::{JobMatchReport, JobMatcher};
pub use reminders::{
    reminder_email, reminder_notification, PreferenceReminder, ReminderPolicy, ReminderReport,
};
pub use runner::{PeriodicTask, ScheduledTick};
pub use tick::{compute_tick, job_match_notification, match_job, JobMatchSnapshot, JobMatchTick};
