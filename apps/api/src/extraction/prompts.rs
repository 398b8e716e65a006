pub const SKILL_EXTRACTION_PROMPT: &str = r#"Extract skills from the resume below.

Return JSON with exactly these keys:
{
  "technical_skills": ["..."],
  "soft_skills": ["..."],
  "certifications": ["..."]
}

Rules:
- technical_skills: languages, frameworks, platforms, tools. Canonical spelling ("Node.js", "PostgreSQL").
- soft_skills: interpersonal and work-style skills the text actually evidences.
- certifications: certification names only ("AWS Solutions Architect", "PMP"), no issuers or dates.
- Use empty arrays when nothing is found. Do not invent skills.

RESUME:
{resume_text}"#;
