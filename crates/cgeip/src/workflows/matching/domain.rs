use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::students::StudentId;

/// Identifier wrapper for company job postings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
}

/// Company-owned posting with the categorical fields the matcher reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub job_id: JobId,
    #[serde(default)]
    pub company_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub work_type: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }
}

/// A student's stored job preferences. Empty fields mean "no opinion".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPreference {
    #[serde(default)]
    pub student_id: StudentId,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub work_type: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
}

impl JobPreference {
    /// A record without a single usable field counts as "no preferences set".
    pub fn is_empty(&self) -> bool {
        !has_terms(&self.industries)
            && !has_terms(&self.skills)
            && !has_terms(&self.work_type)
            && self.preferred_location().is_none()
            && self.salary_min.is_none()
            && self.salary_max.is_none()
    }

    pub fn preferred_location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
    }
}

pub(crate) fn has_terms(terms: &[String]) -> bool {
    terms.iter().any(|term| !term.trim().is_empty())
}
