use cgeip::error::AppError;
use cgeip::seed::read_json;
use cgeip::workflows::eligibility::{evaluate, EligibilityResult, EligibilityView, EvaluateRequest};
use cgeip::workflows::matching::{score_match, MatchCriterion, MatchResult, ScoreRequest};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// JSON document to evaluate
    pub(crate) path: PathBuf,
    /// Print the raw JSON result instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_eligibility_check(args: CheckArgs) -> Result<(), AppError> {
    let request: EvaluateRequest = read_json(&args.path)?;
    let result = evaluate(&request.transcript, &request.requirement);

    if args.json {
        print_json(&EligibilityView::from_result(&result))
    } else {
        print!("{}", eligibility_report(&result));
        Ok(())
    }
}

pub(crate) fn run_match_check(args: CheckArgs) -> Result<(), AppError> {
    let request: ScoreRequest = read_json(&args.path)?;
    let result = score_match(&request.job, &request.preference);

    if args.json {
        print_json(&result)
    } else {
        print!("{}", match_report(&result));
        Ok(())
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn eligibility_report(result: &EligibilityResult) -> String {
    let mut out = String::new();
    let verdict = if result.is_eligible { "ELIGIBLE" } else { "NOT ELIGIBLE" };
    let _ = writeln!(out, "Course eligibility: {verdict} ({}% match)", result.match_percentage);
    let _ = writeln!(
        out,
        "  Required subjects: {} of {} needed",
        result.required_subjects_matched, result.required_subjects_needed
    );
    if result.bonus_subjects_matched > 0 {
        let _ = writeln!(out, "  Bonus subjects: {}", result.bonus_subjects_matched);
    }
    if !result.missing_subjects.is_empty() {
        let _ = writeln!(out, "  Missing: {}", result.missing_subjects.join(", "));
    }
    for mark in &result.insufficient_marks {
        let actual = mark
            .actual
            .map(|value| format!("{value}"))
            .unwrap_or_else(|| "no mark".to_string());
        let _ = writeln!(
            out,
            "  Insufficient: {} ({actual}, needs {})",
            mark.subject, mark.required
        );
    }
    let _ = writeln!(out, "Reasons:");
    for message in result.reason_messages() {
        let _ = writeln!(out, "  - {message}");
    }
    out
}

pub(crate) fn match_report(result: &MatchResult) -> String {
    let mut out = String::new();
    let verdict = if result.is_match { "MATCH" } else { "NO MATCH" };
    let _ = writeln!(out, "Job match: {verdict} (score {}/100)", result.score);
    for criterion in MatchCriterion::ALL {
        let status = if result.matched.contains(&criterion) {
            "matched"
        } else if result.evaluated.contains(&criterion) {
            "not matched"
        } else {
            "no preference"
        };
        let _ = writeln!(out, "  {:<9} {status}", criterion.label());
    }
    out
}
