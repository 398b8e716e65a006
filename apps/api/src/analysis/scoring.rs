//! Score composition: a pluggable, trait-based scorer turning extracted skills into a
//! composite 0–100 score plus a technical / soft / certification breakdown.
//!
//! Default: `HeuristicScorer` (fixed formula, always available).
//! Optional: `LlmScorer`, tried first when configured; any failure falls through.
//!
//! `AppState` holds an `Arc<ScoreComposer>`; handlers only ever call `resolve`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::prompts::SCORING_PROMPT;
use crate::errors::AppError;
use crate::extraction::models::{ExtractedSkills, SkillCounts};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

// ────────────────────────────────────────────────────────────────────────────
// Output data models (shared across all scorer backends)
// ────────────────────────────────────────────────────────────────────────────

/// Sub-scores, each conventionally within 0–100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    #[serde(default)]
    pub technical_pct: f64,
    #[serde(default)]
    pub soft_pct: f64,
    #[serde(default)]
    pub cert_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// 0–99 from the heuristic, 0–100 from an external scorer.
    pub score: u32,
    pub breakdown: Breakdown,
    pub scorer_backend: String, // "heuristic" | "llm"
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait Scorer: Send + Sync {
    fn backend(&self) -> &'static str;

    async fn score(&self, skills: &ExtractedSkills) -> Result<ScoreBreakdown, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicScorer: fixed formula
// ────────────────────────────────────────────────────────────────────────────

const SCORE_FLOOR: usize = 40;
const SCORE_CAP: usize = 99;
const PCT_CAP: usize = 100;

/// score = min(99, 40 + 8t + 4s + 6c)
/// technical = min(100, 8t), soft = min(100, 6s), cert = min(100, 10c)
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn compute(counts: SkillCounts) -> ScoreBreakdown {
        let SkillCounts {
            technical: t,
            soft: s,
            certifications: c,
        } = counts;

        let raw = SCORE_FLOOR
            .saturating_add(t.saturating_mul(8))
            .saturating_add(s.saturating_mul(4))
            .saturating_add(c.saturating_mul(6));

        ScoreBreakdown {
            score: raw.min(SCORE_CAP) as u32,
            breakdown: Breakdown {
                technical_pct: t.saturating_mul(8).min(PCT_CAP) as f64,
                soft_pct: s.saturating_mul(6).min(PCT_CAP) as f64,
                cert_pct: c.saturating_mul(10).min(PCT_CAP) as f64,
            },
            scorer_backend: "heuristic".to_string(),
        }
    }
}

#[async_trait]
impl Scorer for HeuristicScorer {
    fn backend(&self) -> &'static str {
        "heuristic"
    }

    async fn score(&self, skills: &ExtractedSkills) -> Result<ScoreBreakdown, AppError> {
        Ok(Self::compute(skills.counts()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmScorer: external scorer via the LLM client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ExternalScore {
    score: f64,
    #[serde(default)]
    breakdown: Breakdown,
}

impl From<ExternalScore> for ScoreBreakdown {
    fn from(external: ExternalScore) -> Self {
        Self {
            // Truncates; negatives and NaN saturate to 0.
            score: external.score as u32,
            breakdown: external.breakdown,
            scorer_backend: "llm".to_string(),
        }
    }
}

pub struct LlmScorer(pub LlmClient);

#[async_trait]
impl Scorer for LlmScorer {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn score(&self, skills: &ExtractedSkills) -> Result<ScoreBreakdown, AppError> {
        let skills_json =
            serde_json::to_string(skills).map_err(|e| AppError::Internal(e.into()))?;
        let prompt = SCORING_PROMPT.replace("{skills_json}", &skills_json);
        self.0
            .call_json::<ExternalScore>(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map(ScoreBreakdown::from)
            .map_err(|e| AppError::Llm(format!("Scoring failed: {e}")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ScoreComposer: primary with heuristic fallback
// ────────────────────────────────────────────────────────────────────────────

/// The heuristic is the fallback by construction; only the primary is pluggable.
#[derive(Default)]
pub struct ScoreComposer {
    primary: Option<Arc<dyn Scorer>>,
}

impl ScoreComposer {
    pub fn with_primary(mut self, primary: Arc<dyn Scorer>) -> Self {
        self.primary = Some(primary);
        self
    }

    pub async fn resolve(&self, skills: &ExtractedSkills) -> ScoreBreakdown {
        if let Some(primary) = &self.primary {
            match primary.score(skills).await {
                Ok(score) => {
                    debug!("Score computed by {} backend: {}", primary.backend(), score.score);
                    return score;
                }
                Err(e) => warn!(
                    "{} scoring failed, falling back to heuristic: {e}",
                    primary.backend()
                ),
            }
        }
        HeuristicScorer::compute(skills.counts())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(technical: usize, soft: usize, certifications: usize) -> SkillCounts {
        SkillCounts {
            technical,
            soft,
            certifications,
        }
    }

    fn skills(t: usize, s: usize, c: usize) -> ExtractedSkills {
        ExtractedSkills {
            technical_skills: (0..t).map(|i| format!("tech-{i}")).collect(),
            soft_skills: (0..s).map(|i| format!("soft-{i}")).collect(),
            certifications: (0..c).map(|i| format!("cert-{i}")).collect(),
        }
    }

    struct FailingScorer;

    #[async_trait]
    impl Scorer for FailingScorer {
        fn backend(&self) -> &'static str {
            "failing"
        }

        async fn score(&self, _skills: &ExtractedSkills) -> Result<ScoreBreakdown, AppError> {
            Err(AppError::Llm("timeout".to_string()))
        }
    }

    struct FixedScorer;

    #[async_trait]
    impl Scorer for FixedScorer {
        fn backend(&self) -> &'static str {
            "fixed"
        }

        async fn score(&self, _skills: &ExtractedSkills) -> Result<ScoreBreakdown, AppError> {
            Ok(ScoreBreakdown {
                score: 100,
                breakdown: Breakdown {
                    technical_pct: 90.5,
                    soft_pct: 70.0,
                    cert_pct: 0.0,
                },
                scorer_backend: "fixed".to_string(),
            })
        }
    }

    #[test]
    fn test_heuristic_reference_point() {
        let result = HeuristicScorer::compute(counts(3, 2, 1));
        assert_eq!(result.score, 78);
        assert_eq!(result.breakdown.technical_pct, 24.0);
        assert_eq!(result.breakdown.soft_pct, 12.0);
        assert_eq!(result.breakdown.cert_pct, 10.0);
        assert_eq!(result.scorer_backend, "heuristic");
    }

    #[test]
    fn test_heuristic_floor_is_40() {
        let result = HeuristicScorer::compute(counts(0, 0, 0));
        assert_eq!(result.score, 40);
        assert_eq!(result.breakdown, Breakdown::default());
    }

    #[test]
    fn test_heuristic_caps() {
        let result = HeuristicScorer::compute(counts(50, 50, 50));
        assert_eq!(result.score, 99);
        assert_eq!(result.breakdown.technical_pct, 100.0);
        assert_eq!(result.breakdown.soft_pct, 100.0);
        assert_eq!(result.breakdown.cert_pct, 100.0);
    }

    #[test]
    fn test_heuristic_huge_counts_do_not_overflow() {
        let result = HeuristicScorer::compute(counts(usize::MAX, usize::MAX, usize::MAX));
        assert_eq!(result.score, 99);
    }

    #[test]
    fn test_heuristic_monotonic_in_each_count() {
        for t in 0..15 {
            for s in 0..15 {
                for c in 0..15 {
                    let base = HeuristicScorer::compute(counts(t, s, c)).score;
                    assert!(base <= 99);
                    assert!(HeuristicScorer::compute(counts(t + 1, s, c)).score >= base);
                    assert!(HeuristicScorer::compute(counts(t, s + 1, c)).score >= base);
                    assert!(HeuristicScorer::compute(counts(t, s, c + 1)).score >= base);
                }
            }
        }
    }

    #[test]
    fn test_external_score_truncated() {
        let external: ExternalScore = serde_json::from_str(
            r#"{"score": 87.9, "breakdown": {"technical_pct": 91, "soft_pct": 40.5, "cert_pct": 20}}"#,
        )
        .unwrap();
        let result = ScoreBreakdown::from(external);
        assert_eq!(result.score, 87);
        assert_eq!(result.breakdown.soft_pct, 40.5);
        assert_eq!(result.scorer_backend, "llm");
    }

    #[test]
    fn test_external_score_missing_breakdown_defaults_to_zero() {
        let external: ExternalScore = serde_json::from_str(r#"{"score": -3}"#).unwrap();
        let result = ScoreBreakdown::from(external);
        assert_eq!(result.score, 0);
        assert_eq!(result.breakdown, Breakdown::default());
    }

    #[tokio::test]
    async fn test_composer_without_primary_uses_heuristic() {
        let result = ScoreComposer::default().resolve(&skills(3, 2, 1)).await;
        assert_eq!(result.score, 78);
    }

    #[tokio::test]
    async fn test_composer_trusts_primary_verbatim() {
        let composer = ScoreComposer::default().with_primary(Arc::new(FixedScorer));
        let result = composer.resolve(&skills(0, 0, 0)).await;
        assert_eq!(result.score, 100);
        assert_eq!(result.breakdown.technical_pct, 90.5);
        assert_eq!(result.scorer_backend, "fixed");
    }

    #[tokio::test]
    async fn test_composer_failing_primary_falls_back() {
        let composer = ScoreComposer::default().with_primary(Arc::new(FailingScorer));
        let result = composer.resolve(&skills(3, 2, 1)).await;
        assert_eq!(result, HeuristicScorer::compute(counts(3, 2, 1)));
    }

    #[tokio::test]
    async fn test_heuristic_through_trait_object() {
        let scorer: Arc<dyn Scorer> = Arc::new(HeuristicScorer);
        let result = scorer.score(&skills(1, 1, 1)).await.unwrap();
        assert_eq!(result.score, 58);
    }
}
