use super::common::*;
use crate::workflows::matching::domain::JobPreference;
use crate::workflows::matching::{score_match, MatchCriterion};

#[test]
fn fintech_python_remote_job_matches_every_criterion() {
    let result = score_match(&fintech_job(), &finance_preference());

    // python and java both map to programming_languages.
    assert_eq!(result.score, 100);
    assert!(result.is_match);
    assert_eq!(result.matched.len(), 4);
}

#[test]
fn nothing_in_common_scores_zero() {
    let mut preference = finance_preference();
    preference.skills = terms(&["python"]);
    preference.location = Some("Johannesburg".to_string());

    let result = score_match(&clinic_job(), &preference);

    assert_eq!(result.score, 0);
    assert!(!result.is_match);
    assert!(result.matched.is_empty());
    assert_eq!(result.evaluated.len(), 4);
}

#[test]
fn two_of_four_criteria_is_exactly_a_match() {
    let mut job = clinic_job();
    job.industries = terms(&["banking"]);
    job.work_type = terms(&["Work from home"]);

    let mut preference = finance_preference();
    preference.skills = terms(&["sales"]);
    preference.location = Some("Johannesburg".to_string());

    let result = score_match(&job, &preference);

    assert_eq!(result.score, 50);
    assert!(result.is_match);
    assert!(result.matched.contains(&MatchCriterion::Industry));
    assert!(result.matched.contains(&MatchCriterion::WorkType));
}

#[test]
fn unset_preferences_are_neutral_but_score_stays_out_of_100() {
    let preference = JobPreference {
        industries: terms(&["finance"]),
        ..JobPreference::default()
    };

    let result = score_match(&fintech_job(), &preference);

    assert_eq!(result.score, 25);
    assert!(!result.is_match);
    assert_eq!(
        result.evaluated.iter().copied().collect::<Vec<_>>(),
        vec![MatchCriterion::Industry]
    );
}

#[test]
fn empty_preference_scores_nothing() {
    let result = score_match(&fintech_job(), &JobPreference::default());
    assert_eq!(result.score, 0);
    assert!(result.evaluated.is_empty());
}

#[test]
fn blank_terms_count_as_unset() {
    let preference = JobPreference {
        skills: terms(&["  "]),
        location: Some(" ".to_string()),
        ..JobPreference::default()
    };
    assert!(preference.is_empty());
    assert!(score_match(&fintech_job(), &preference).evaluated.is_empty());
}

#[test]
fn summary_lists_matched_criteria() {
    let result = score_match(&fintech_job(), &finance_preference());
    assert_eq!(
        result.summary(),
        "100% match on industry, skills, work type, location"
    );
}
