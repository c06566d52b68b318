//! Course eligibility: transcript subjects and overall percentage checked
//! against the requirement set an institution attaches to a course.

pub mod domain;
mod evaluator;
pub mod reasons;
pub mod repository;
pub mod router;
pub mod service;
mod subjects;

#[cfg(test)]
mod tests;

pub use domain::{
    AdditionalSubject, Course, CourseId, CourseRequirement, RequiredSubject, Transcript,
    TranscriptSubject,
};
pub use evaluator::{evaluate, evaluate_student, EligibilityResult, InsufficientMark};
pub use reasons::EligibilityReason;
pub use repository::{CourseEligibility, CourseRepository, EligibilityView, TranscriptRepository};
pub use router::{eligibility_router, EvaluateRequest};
pub use service::{EligibilityService, EligibilityServiceError};
