use std::fmt;

use serde::{Deserialize, Serialize};

use crate::workflows::students::StudentId;

/// Identifier wrapper for institution courses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId(pub String);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The active transcript uploaded by a student. Re-uploading replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub student_id: StudentId,
    #[serde(default)]
    pub overall_percentage: Option<f32>,
    #[serde(default)]
    pub subjects: Vec<TranscriptSubject>,
}

/// One transcript line. Marks are on a 0-100 scale; letter grades are kept as
/// recorded and never converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSubject {
    pub name: String,
    #[serde(default)]
    pub mark: Option<f32>,
    #[serde(default)]
    pub grade_letter: Option<String>,
}

impl TranscriptSubject {
    pub fn with_mark(name: impl Into<String>, mark: f32) -> Self {
        Self {
            name: name.into(),
            mark: Some(mark),
            grade_letter: None,
        }
    }

    /// The comparable mark, if the subject carries a finite numeric one.
    pub fn numeric_mark(&self) -> Option<f32> {
        self.mark.filter(|mark| mark.is_finite())
    }
}

/// Admission rules an institution attaches to a course.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseRequirement {
    #[serde(default)]
    pub required_subjects: Vec<RequiredSubject>,
    #[serde(default)]
    pub additional_subjects: Vec<AdditionalSubject>,
    #[serde(default)]
    pub minimum_overall_percentage: f32,
    /// "Pass N of M": defaults to every required subject.
    #[serde(default)]
    pub minimum_required_subjects_needed: Option<u32>,
}

impl CourseRequirement {
    /// Courses without required subjects are open to every student.
    pub fn is_general(&self) -> bool {
        self.required_subjects.is_empty()
    }

    pub fn required_subjects_needed(&self) -> u32 {
        self.minimum_required_subjects_needed
            .unwrap_or(self.required_subjects.len() as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSubject {
    pub subject_name: String,
    pub minimum_mark: f32,
}

/// Bonus subject; never blocks eligibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalSubject {
    pub subject_name: String,
    pub preferred_minimum_mark: f32,
}

/// A course as stored by the institution, together with its requirement set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: CourseId,
    pub institution_id: String,
    pub name: String,
    #[serde(default)]
    pub requirement: CourseRequirement,
}
