pub mod clock;
pub mod eligibility;
pub mod matching;
pub mod notifications;
pub mod repository;
pub mod scheduler;
pub mod students;
