//! In-app notifications and the outbound mail hook the schedulers write to.

pub mod domain;
pub mod repository;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{NotificationId, NotificationKind, NotificationRecord};
pub use repository::{EmailMessage, MailError, Mailer, NotificationRepository};
pub use router::{notification_router, InboxView};
