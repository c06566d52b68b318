use serde::{Deserialize, Serialize};

use super::domain::{NotificationKind, NotificationRecord};
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::StudentId;

/// Storage abstraction for the notifications collection.
pub trait NotificationRepository: Send + Sync {
    /// Persist a record, assigning a `notification_id` when it has none.
    fn insert(&self, record: NotificationRecord) -> Result<NotificationRecord, RepositoryError>;
    /// A user's inbox, newest first.
    fn for_user(&self, user_id: &StudentId) -> Result<Vec<NotificationRecord>, RepositoryError>;
    fn has_unread(
        &self,
        user_id: &StudentId,
        kind: NotificationKind,
    ) -> Result<bool, RepositoryError>;
}

/// Outbound transactional email hook. Delivery is best effort.
pub trait Mailer: Send + Sync {
    fn send(&self, message: EmailMessage) -> Result<(), MailError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Email dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("recipient address missing")]
    MissingRecipient,
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}
