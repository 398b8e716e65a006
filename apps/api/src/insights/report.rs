use serde::Serialize;

use crate::analysis::scoring::{Breakdown, ScoreBreakdown};
use crate::extraction::models::ExtractedSkills;

const SKILL_GAP_LABELS: [&str; 4] = [
    "Technical Skills",
    "Soft Skills",
    "Certifications",
    "Overall Match",
];

/// Estimated yearly salary keyed by lowercase skill name with spaces as `_`.
const SALARY_TABLE: [(&str, u32); 8] = [
    ("python", 95_000),
    ("react", 85_000),
    ("machine_learning", 120_000),
    ("aws", 110_000),
    ("docker", 100_000),
    ("node.js", 90_000),
    ("javascript", 85_000),
    ("sql", 80_000),
];
const SALARY_SKILLS_CONSIDERED: usize = 6;
const GENERAL_SALARY: u32 = 60_000;

/// Parallel label/value arrays, ready for a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries<T> {
    pub labels: Vec<String>,
    pub values: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeAnalysis {
    pub resume_id: i64,
    pub filename: String,
    pub score: u32,
    pub match_score: u32,
    pub breakdown: Breakdown,
    pub scorer_backend: String,
    pub skills: ExtractedSkills,
    pub skill_gap: ChartSeries<f64>,
    pub salary: ChartSeries<u32>,
}

impl ResumeAnalysis {
    pub fn new(resume_id: i64, filename: String, skills: ExtractedSkills, score: ScoreBreakdown) -> Self {
        let ScoreBreakdown {
            score,
            breakdown,
            scorer_backend,
        } = score;

        let skill_gap = ChartSeries {
            labels: SKILL_GAP_LABELS.iter().map(|l| l.to_string()).collect(),
            values: vec![
                breakdown.technical_pct,
                breakdown.soft_pct,
                breakdown.cert_pct,
                f64::from(score),
            ],
        };
        let salary = salary_estimates(&skills.technical_skills);

        Self {
            resume_id,
            filename,
            score,
            match_score: score,
            breakdown,
            scorer_backend,
            skills,
            skill_gap,
            salary,
        }
    }
}

/// Looks up the first six technical skills in the salary table, keeping the
/// skill's own spelling as the label. No hit at all yields a single "General" bar.
pub fn salary_estimates(technical_skills: &[String]) -> ChartSeries<u32> {
    let (labels, values): (Vec<String>, Vec<u32>) = technical_skills
        .iter()
        .take(SALARY_SKILLS_CONSIDERED)
        .filter_map(|skill| {
            let key = skill.to_lowercase().replace(' ', "_");
            SALARY_TABLE
                .iter()
                .find(|(k, _)| *k == key)
                .map(|&(_, salary)| (skill.clone(), salary))
        })
        .unzip();

    if labels.is_empty() {
        return ChartSeries {
            labels: vec!["General".to_string()],
            values: vec![GENERAL_SALARY],
        };
    }
    ChartSeries { labels, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scoring::HeuristicScorer;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_salary_lookup_keeps_order_and_labels() {
        let series = salary_estimates(&strings(&["Python", "Git", "Machine Learning", "Node.js"]));
        assert_eq!(series.labels, strings(&["Python", "Machine Learning", "Node.js"]));
        assert_eq!(series.values, vec![95_000, 120_000, 90_000]);
    }

    #[test]
    fn test_salary_only_first_six_skills_considered() {
        let series = salary_estimates(&strings(&["Git", "Git", "Git", "Git", "Git", "Git", "SQL"]));
        assert_eq!(series.labels, strings(&["General"]));
        assert_eq!(series.values, vec![60_000]);
    }

    #[test]
    fn test_salary_default_when_empty() {
        let series = salary_estimates(&[]);
        assert_eq!(series.labels, strings(&["General"]));
        assert_eq!(series.values, vec![60_000]);
    }

    #[test]
    fn test_analysis_payload_shape() {
        let skills = ExtractedSkills {
            technical_skills: strings(&["Python", "Docker", "AWS"]),
            soft_skills: strings(&["Leadership", "Communication"]),
            certifications: strings(&["AWS"]),
        };
        let score = HeuristicScorer::compute(skills.counts());
        let analysis = ResumeAnalysis::new(4, "cv.pdf".to_string(), skills, score);

        assert_eq!(analysis.score, 78);
        assert_eq!(analysis.match_score, 78);
        assert_eq!(analysis.skill_gap.values, vec![24.0, 12.0, 10.0, 78.0]);
        assert_eq!(analysis.skill_gap.labels[3], "Overall Match");
        assert_eq!(analysis.salary.values, vec![95_000, 100_000, 110_000]);

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["resume_id"], 4);
        assert_eq!(json["breakdown"]["technical_pct"], 24.0);
        assert_eq!(json["skills"]["certifications"][0], "AWS");
        assert_eq!(json["scorer_backend"], "heuristic");
    }
}
