//! Job-preference matching: category-based fuzzy equivalence for skills,
//! industries and work types, plus a location rule, folded into a 0-100 score.

pub mod categories;
mod criteria;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use categories::{is_industry_related, is_skill_related, is_work_type_related};
pub use criteria::{
    location_matches, score_match, MatchCriterion, MatchResult, CRITERION_WEIGHT,
    MATCH_THRESHOLD,
};
pub use domain::{JobId, JobPosting, JobPreference, JobStatus};
pub use repository::{JobMatchView, JobRepository, PreferenceRepository};
pub use router::{matching_router, ScoreRequest, ScoreResponse};
pub use service::{rank_jobs, JobMatchService, MatchServiceError};
