use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repository::RepositoryError;

/// Identifier wrapper for student accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The slice of a student account the schedulers need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAccount {
    pub student_id: StudentId,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// Read access to registered students.
pub trait StudentRepository: Send + Sync {
    /// Students whose accounts were created at or before `cutoff`.
    fn registered_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<StudentAccount>, RepositoryError>;
}
