use serde::Serialize;

use super::domain::{Course, CourseId, Transcript};
use super::evaluator::{EligibilityResult, InsufficientMark};
use super::reasons::EligibilityReason;
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::StudentId;

/// Storage abstraction for the single active transcript per student.
pub trait TranscriptRepository: Send + Sync {
    fn fetch(&self, student_id: &StudentId) -> Result<Option<Transcript>, RepositoryError>;
    /// Insert or replace the student's active transcript.
    fn replace(&self, transcript: Transcript) -> Result<(), RepositoryError>;
}

/// Storage abstraction for institution courses and their requirements.
pub trait CourseRepository: Send + Sync {
    fn fetch(&self, course_id: &CourseId) -> Result<Option<Course>, RepositoryError>;
    fn list(&self) -> Result<Vec<Course>, RepositoryError>;
}

/// Evaluation of one stored course for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseEligibility {
    pub course_id: CourseId,
    pub course_name: String,
    pub institution_id: String,
    pub result: EligibilityResult,
}

impl CourseEligibility {
    pub fn view(&self) -> EligibilityView {
        let mut view = EligibilityView::from_result(&self.result);
        view.course_id = Some(self.course_id.clone());
        view.course_name = Some(self.course_name.clone());
        view.institution_id = Some(self.institution_id.clone());
        view
    }
}

/// JSON shape served to the UI, with reasons both as codes and as sentences.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<String>,
    pub is_eligible: bool,
    pub match_percentage: u8,
    pub missing_subjects: Vec<String>,
    pub insufficient_marks: Vec<InsufficientMark>,
    pub required_subjects_matched: u32,
    pub required_subjects_needed: u32,
    pub bonus_subjects_matched: u32,
    pub reasons: Vec<EligibilityReason>,
    pub messages: Vec<String>,
}

impl EligibilityView {
    pub fn from_result(result: &EligibilityResult) -> Self {
        Self {
            course_id: None,
            course_name: None,
            institution_id: None,
            is_eligible: result.is_eligible,
            match_percentage: result.match_percentage,
            missing_subjects: result.missing_subjects.clone(),
            insufficient_marks: result.insufficient_marks.clone(),
            required_subjects_matched: result.required_subjects_matched,
            required_subjects_needed: result.required_subjects_needed,
            bonus_subjects_matched: result.bonus_subjects_matched,
            reasons: result.reasons.clone(),
            messages: result.reason_messages(),
        }
    }
}
