use serde::{Deserialize, Serialize};

/// Structured explanation attached to an eligibility decision. The UI gets the
/// code and the formatted summary side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum EligibilityReason {
    GeneralCourse,
    OverallPercentageMet {
        actual: f32,
        required: f32,
    },
    OverallPercentageNotProvided {
        required: f32,
    },
    OverallPercentageBelowMinimum {
        actual: f32,
        required: f32,
    },
    RequiredSubjectsMet {
        matched: u32,
        total: usize,
    },
    MissingSubject {
        subject: String,
    },
    InsufficientMark {
        subject: String,
        actual: Option<f32>,
        required: f32,
    },
    TooFewRequiredSubjects {
        matched: u32,
        needed: u32,
    },
    BonusSubjects {
        matched: u32,
    },
    NoTranscript,
    MalformedRecord {
        detail: String,
    },
}

impl EligibilityReason {
    pub fn summary(&self) -> String {
        match self {
            EligibilityReason::GeneralCourse => {
                "General course: open to every student".to_string()
            }
            EligibilityReason::OverallPercentageMet { actual, required } => format!(
                "Overall percentage {} meets the required {}",
                format_percent(*actual),
                format_percent(*required)
            ),
            EligibilityReason::OverallPercentageNotProvided { required } => format!(
                "Transcript has no overall percentage; the {} minimum was not checked",
                format_percent(*required)
            ),
            EligibilityReason::OverallPercentageBelowMinimum { actual, required } => format!(
                "Overall percentage {} is below the required {}",
                format_percent(*actual),
                format_percent(*required)
            ),
            EligibilityReason::RequiredSubjectsMet { matched, total } => {
                format!("Meets {matched} of {total} required subjects")
            }
            EligibilityReason::MissingSubject { subject } => {
                format!("Missing required subject: {subject}")
            }
            EligibilityReason::InsufficientMark {
                subject,
                actual: Some(actual),
                required,
            } => format!(
                "{subject}: mark {} is below the required {}",
                format_mark(*actual),
                format_mark(*required)
            ),
            EligibilityReason::InsufficientMark {
                subject,
                actual: None,
                required,
            } => format!(
                "{subject}: no numeric mark to compare with the required {}",
                format_mark(*required)
            ),
            EligibilityReason::TooFewRequiredSubjects { matched, needed } => {
                format!("Only {matched} required subject(s) met; {needed} needed")
            }
            EligibilityReason::BonusSubjects { matched } => {
                format!("{matched} additional subject(s) strengthen the application")
            }
            EligibilityReason::NoTranscript => {
                "No transcript uploaded; upload one to check eligibility".to_string()
            }
            EligibilityReason::MalformedRecord { detail } => {
                format!("Unable to evaluate eligibility: {detail}")
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            EligibilityReason::OverallPercentageBelowMinimum { .. }
                | EligibilityReason::MissingSubject { .. }
                | EligibilityReason::InsufficientMark { .. }
                | EligibilityReason::TooFewRequiredSubjects { .. }
                | EligibilityReason::NoTranscript
                | EligibilityReason::MalformedRecord { .. }
        )
    }
}

fn format_percent(value: f32) -> String {
    format!("{}%", format_mark(value))
}

fn format_mark(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
