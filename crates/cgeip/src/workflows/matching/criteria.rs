use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::categories::{is_industry_related, is_skill_related, is_work_type_related};
use super::domain::{has_terms, JobPosting, JobPreference};

/// Points each matched criterion contributes to the score.
pub const CRITERION_WEIGHT: u8 = 25;

/// Minimum score that counts as a match and triggers a notification.
pub const MATCH_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchCriterion {
    Industry,
    Skills,
    WorkType,
    Location,
}

impl MatchCriterion {
    pub const ALL: [MatchCriterion; 4] = [
        MatchCriterion::Industry,
        MatchCriterion::Skills,
        MatchCriterion::WorkType,
        MatchCriterion::Location,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MatchCriterion::Industry => "industry",
            MatchCriterion::Skills => "skills",
            MatchCriterion::WorkType => "work type",
            MatchCriterion::Location => "location",
        }
    }

    /// `None` when the preference leaves this criterion unset.
    pub(crate) fn assess(self, job: &JobPosting, preference: &JobPreference) -> Option<bool> {
        match self {
            MatchCriterion::Industry => any_related(
                &job.industries,
                &preference.industries,
                is_industry_related,
            ),
            MatchCriterion::Skills => {
                any_related(&job.skills, &preference.skills, is_skill_related)
            }
            MatchCriterion::WorkType => any_related(
                &job.work_type,
                &preference.work_type,
                is_work_type_related,
            ),
            MatchCriterion::Location => preference
                .preferred_location()
                .map(|preferred| location_matches(&job.location, preferred)),
        }
    }
}

fn any_related(
    offered: &[String],
    preferred: &[String],
    related: fn(&str, &str) -> bool,
) -> Option<bool> {
    if !has_terms(preferred) {
        return None;
    }
    Some(
        offered
            .iter()
            .any(|offer| preferred.iter().any(|wanted| related(offer, wanted))),
    )
}

/// Location rule: containment, or a preference for remote/flexible work.
pub fn location_matches(job_location: &str, preferred: &str) -> bool {
    let preferred = preferred.trim().to_lowercase();
    if preferred.is_empty() {
        return false;
    }
    if preferred == "remote" {
        return true;
    }

    let job_location = job_location.trim().to_lowercase();
    if job_location.contains(&preferred) {
        return true;
    }

    preferred == "flexible"
        && ["remote", "hybrid", "on-site"]
            .iter()
            .any(|mode| job_location.contains(mode))
}

/// Outcome of comparing one job with one student's preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub is_match: bool,
    pub score: u8,
    pub matched: BTreeSet<MatchCriterion>,
    pub evaluated: BTreeSet<MatchCriterion>,
}

impl MatchResult {
    pub fn summary(&self) -> String {
        if self.matched.is_empty() {
            return format!("{}% match: no criteria matched", self.score);
        }
        let labels: Vec<&str> = self.matched.iter().map(|criterion| criterion.label()).collect();
        format!("{}% match on {}", self.score, labels.join(", "))
    }
}

/// Weighted score across the four criteria. Unset preference fields are
/// skipped, but the score is always out of 100.
pub fn score_match(job: &JobPosting, preference: &JobPreference) -> MatchResult {
    let mut matched = BTreeSet::new();
    let mut evaluated = BTreeSet::new();

    for criterion in MatchCriterion::ALL {
        if let Some(hit) = criterion.assess(job, preference) {
            evaluated.insert(criterion);
            if hit {
                matched.insert(criterion);
            }
        }
    }

    let score = CRITERION_WEIGHT * matched.len() as u8;
    MatchResult {
        is_match: score >= MATCH_THRESHOLD,
        score,
        matched,
        evaluated,
    }
}
