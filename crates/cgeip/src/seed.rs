//! JSON documents read from disk: the optional store seed and the inputs of
//! the offline `check` commands.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::workflows::eligibility::{Course, Transcript};
use crate::workflows::matching::{JobPosting, JobPreference};
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::StudentAccount;

/// Initial contents for the in-memory stores.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub students: Vec<StudentAccount>,
    #[serde(default)]
    pub transcripts: Vec<Transcript>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
    #[serde(default)]
    pub preferences: Vec<JobPreference>,
}

impl SeedData {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        read_json(path)
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
            && self.transcripts.is_empty()
            && self.courses.is_empty()
            && self.jobs.is_empty()
            && self.preferences.is_empty()
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SeedError> {
    let raw = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed json in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("seed rejected by store: {0}")]
    Store(#[from] RepositoryError),
}
