use std::sync::Arc;

use tracing::debug;

use super::domain::{Course, CourseId, Transcript};
use super::evaluator::evaluate_student;
use super::repository::{CourseEligibility, CourseRepository, TranscriptRepository};
use crate::workflows::repository::RepositoryError;
use crate::workflows::students::StudentId;

/// Service joining stored transcripts with stored course requirements.
pub struct EligibilityService<T, C> {
    transcripts: Arc<T>,
    courses: Arc<C>,
}

impl<T, C> EligibilityService<T, C>
where
    T: TranscriptRepository + 'static,
    C: CourseRepository + 'static,
{
    pub fn new(transcripts: Arc<T>, courses: Arc<C>) -> Self {
        Self {
            transcripts,
            courses,
        }
    }

    /// Evaluate one course for one student.
    pub fn check(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<CourseEligibility, EligibilityServiceError> {
        let course = self
            .courses
            .fetch(course_id)?
            .ok_or_else(|| EligibilityServiceError::CourseNotFound(course_id.clone()))?;
        let transcript = self.transcripts.fetch(student_id)?;

        let eligibility = assess(course, transcript.as_ref());
        debug!(
            student = %student_id,
            course = %eligibility.course_id,
            eligible = eligibility.result.is_eligible,
            "evaluated course eligibility"
        );
        Ok(eligibility)
    }

    /// Evaluate every course, eligible ones first and then by match percentage.
    pub fn eligible_courses(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<CourseEligibility>, EligibilityServiceError> {
        let transcript = self.transcripts.fetch(student_id)?;
        let mut evaluations: Vec<CourseEligibility> = self
            .courses
            .list()?
            .into_iter()
            .map(|course| assess(course, transcript.as_ref()))
            .collect();

        evaluations.sort_by(|left, right| {
            right
                .result
                .is_eligible
                .cmp(&left.result.is_eligible)
                .then(right.result.match_percentage.cmp(&left.result.match_percentage))
                .then_with(|| left.course_name.cmp(&right.course_name))
        });

        debug!(
            student = %student_id,
            courses = evaluations.len(),
            eligible = evaluations.iter().filter(|e| e.result.is_eligible).count(),
            "evaluated course catalogue"
        );
        Ok(evaluations)
    }
}

fn assess(course: Course, transcript: Option<&Transcript>) -> CourseEligibility {
    let result = evaluate_student(transcript, &course.requirement);
    CourseEligibility {
        course_id: course.course_id,
        course_name: course.name,
        institution_id: course.institution_id,
        result,
    }
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error("course {0} not found")]
    CourseNotFound(CourseId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
