use serde::{Deserialize, Serialize};

use super::domain::{CourseRequirement, Transcript};
use super::reasons::EligibilityReason;
use super::subjects::SubjectLookup;

/// Required subject that was found on the transcript but did not reach the minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsufficientMark {
    pub subject: String,
    pub actual: Option<f32>,
    pub required: f32,
}

/// Derived eligibility decision. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub is_eligible: bool,
    /// Coarse badge value: 0, 50 or 100.
    pub match_percentage: u8,
    pub missing_subjects: Vec<String>,
    pub insufficient_marks: Vec<InsufficientMark>,
    pub required_subjects_matched: u32,
    pub required_subjects_needed: u32,
    pub bonus_subjects_matched: u32,
    pub reasons: Vec<EligibilityReason>,
}

impl EligibilityResult {
    pub fn general() -> Self {
        Self {
            is_eligible: true,
            match_percentage: 100,
            missing_subjects: Vec::new(),
            insufficient_marks: Vec::new(),
            required_subjects_matched: 0,
            required_subjects_needed: 0,
            bonus_subjects_matched: 0,
            reasons: vec![EligibilityReason::GeneralCourse],
        }
    }

    pub fn no_transcript(requirement: &CourseRequirement) -> Self {
        Self::closed(requirement, EligibilityReason::NoTranscript)
    }

    fn closed(requirement: &CourseRequirement, reason: EligibilityReason) -> Self {
        Self {
            is_eligible: false,
            match_percentage: 0,
            missing_subjects: Vec::new(),
            insufficient_marks: Vec::new(),
            required_subjects_matched: 0,
            required_subjects_needed: requirement.required_subjects_needed(),
            bonus_subjects_matched: 0,
            reasons: vec![reason],
        }
    }

    pub fn reason_messages(&self) -> Vec<String> {
        self.reasons.iter().map(EligibilityReason::summary).collect()
    }
}

/// Decide whether a transcript satisfies a course requirement.
pub fn evaluate(transcript: &Transcript, requirement: &CourseRequirement) -> EligibilityResult {
    if requirement.is_general() {
        return EligibilityResult::general();
    }

    if let Some(detail) = malformed_detail(transcript, requirement) {
        return EligibilityResult::closed(requirement, EligibilityReason::MalformedRecord { detail });
    }

    let required_overall = requirement.minimum_overall_percentage;
    let overall_passed = transcript
        .overall_percentage
        .map_or(true, |overall| overall >= required_overall);

    let lookup = SubjectLookup::new(&transcript.subjects);
    let mut missing_subjects = Vec::new();
    let mut insufficient_marks = Vec::new();
    let mut required_subjects_matched: u32 = 0;

    for required in &requirement.required_subjects {
        match lookup.find(&required.subject_name) {
            None => missing_subjects.push(required.subject_name.clone()),
            Some(subject) => match subject.numeric_mark() {
                Some(mark) if mark >= required.minimum_mark => required_subjects_matched += 1,
                actual => insufficient_marks.push(InsufficientMark {
                    subject: required.subject_name.clone(),
                    actual,
                    required: required.minimum_mark,
                }),
            },
        }
    }

    let required_subjects_needed = requirement.required_subjects_needed();
    let subjects_passed = required_subjects_matched >= required_subjects_needed;
    let is_eligible = overall_passed && subjects_passed;

    let bonus_subjects_matched = requirement
        .additional_subjects
        .iter()
        .filter(|additional| {
            lookup
                .find(&additional.subject_name)
                .and_then(|subject| subject.numeric_mark())
                .is_some_and(|mark| mark >= additional.preferred_minimum_mark)
        })
        .count() as u32;

    let checks_passed = u8::from(overall_passed) + u8::from(subjects_passed);
    let match_percentage = checks_passed * 50;

    let mut reasons = Vec::new();
    if is_eligible {
        reasons.push(match transcript.overall_percentage {
            Some(actual) => EligibilityReason::OverallPercentageMet {
                actual,
                required: required_overall,
            },
            None => EligibilityReason::OverallPercentageNotProvided {
                required: required_overall,
            },
        });
        reasons.push(EligibilityReason::RequiredSubjectsMet {
            matched: required_subjects_matched,
            total: requirement.required_subjects.len(),
        });
        if bonus_subjects_matched > 0 {
            reasons.push(EligibilityReason::BonusSubjects {
                matched: bonus_subjects_matched,
            });
        }
    } else {
        if let (false, Some(actual)) = (overall_passed, transcript.overall_percentage) {
            reasons.push(EligibilityReason::OverallPercentageBelowMinimum {
                actual,
                required: required_overall,
            });
        }
        if !subjects_passed {
            reasons.extend(
                missing_subjects
                    .iter()
                    .map(|subject| EligibilityReason::MissingSubject {
                        subject: subject.clone(),
                    }),
            );
            reasons.extend(
                insufficient_marks
                    .iter()
                    .map(|shortfall| EligibilityReason::InsufficientMark {
                        subject: shortfall.subject.clone(),
                        actual: shortfall.actual,
                        required: shortfall.required,
                    }),
            );
            reasons.push(EligibilityReason::TooFewRequiredSubjects {
                matched: required_subjects_matched,
                needed: required_subjects_needed,
            });
        }
    }

    EligibilityResult {
        is_eligible,
        match_percentage,
        missing_subjects,
        insufficient_marks,
        required_subjects_matched,
        required_subjects_needed,
        bonus_subjects_matched,
        reasons,
    }
}

/// Like [`evaluate`], but for a student who may not have uploaded a transcript yet.
pub fn evaluate_student(
    transcript: Option<&Transcript>,
    requirement: &CourseRequirement,
) -> EligibilityResult {
    match transcript {
        Some(transcript) => evaluate(transcript, requirement),
        None if requirement.is_general() => EligibilityResult::general(),
        None => EligibilityResult::no_transcript(requirement),
    }
}

fn malformed_detail(transcript: &Transcript, requirement: &CourseRequirement) -> Option<String> {
    if !requirement.minimum_overall_percentage.is_finite() {
        return Some("course minimum overall percentage is not a number".to_string());
    }
    if let Some(required) = requirement
        .required_subjects
        .iter()
        .find(|required| !required.minimum_mark.is_finite())
    {
        return Some(format!(
            "minimum mark for {} is not a number",
            required.subject_name
        ));
    }
    if transcript
        .overall_percentage
        .is_some_and(|overall| !overall.is_finite())
    {
        return Some("transcript overall percentage is not a number".to_string());
    }
    None
}
