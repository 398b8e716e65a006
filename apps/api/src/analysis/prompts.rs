pub const SCORING_PROMPT: &str = r#"Score this candidate's skill profile for general employability in software roles.

Skills (JSON):
{skills_json}

Return JSON:
{
  "score": <integer 0-100>,
  "breakdown": {
    "technical_pct": <0-100>,
    "soft_pct": <0-100>,
    "cert_pct": <0-100>
  }
}

Weigh depth and market demand of technical skills most, then certifications, then soft skills."#;
