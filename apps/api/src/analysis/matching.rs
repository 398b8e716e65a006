//! Match analysis between a candidate's skills and a job's required skills.

use std::collections::BTreeSet;

use serde::Serialize;

/// Overlap between two skill lists. All names are lowercase.
///
/// Invariants: `matching ∪ missing = job set`, `matching ∪ additional = candidate set`,
/// and `matching` is disjoint from both `missing` and `additional`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub match_percentage: f64,
    pub matching_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub additional_skills: BTreeSet<String>,
}

/// Compares skill lists case-insensitively. An empty job list scores 0.
pub fn analyze_match<C, J>(candidate_skills: &[C], job_skills: &[J]) -> MatchResult
where
    C: AsRef<str>,
    J: AsRef<str>,
{
    let candidate = lowercase_set(candidate_skills);
    let job = lowercase_set(job_skills);

    let matching: BTreeSet<String> = candidate.intersection(&job).cloned().collect();
    let missing: BTreeSet<String> = job.difference(&candidate).cloned().collect();
    let additional: BTreeSet<String> = candidate.difference(&job).cloned().collect();

    let match_percentage = if job.is_empty() {
        0.0
    } else {
        round2(matching.len() as f64 / job.len() as f64 * 100.0)
    };

    MatchResult {
        match_percentage,
        matching_skills: matching,
        missing_skills: missing,
        additional_skills: additional,
    }
}

fn lowercase_set<S: AsRef<str>>(skills: &[S]) -> BTreeSet<String> {
    skills.iter().map(|s| s.as_ref().to_lowercase()).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
