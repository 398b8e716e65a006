//! Skill extraction strategies.
//!
//! `SkillPipeline::resolve` is the only entry point callers use: it tries the primary
//! backend (if one is configured) and falls back to the keyword extractor on any error.
//! Callers never branch on which backend is available.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::extraction::keyword::KeywordSkillExtractor;
use crate::extraction::models::ExtractedSkills;
use crate::extraction::prompts::SKILL_EXTRACTION_PROMPT;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{truncate_chars, LlmClient};

const MAX_PROMPT_CHARS: usize = 12_000;

#[async_trait]
pub trait SkillExtractor: Send + Sync {
    /// Short label for logs ("keyword", "llm").
    fn backend(&self) -> &'static str;

    async fn extract(&self, text: &str) -> Result<ExtractedSkills, AppError>;
}

#[async_trait]
impl SkillExtractor for KeywordSkillExtractor {
    fn backend(&self) -> &'static str {
        "keyword"
    }

    async fn extract(&self, text: &str) -> Result<ExtractedSkills, AppError> {
        Ok(self.extract_skills(text))
    }
}

/// Higher-fidelity extractor backed by the LLM client.
pub struct LlmSkillExtractor(pub LlmClient);

#[async_trait]
impl SkillExtractor for LlmSkillExtractor {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn extract(&self, text: &str) -> Result<ExtractedSkills, AppError> {
        let prompt =
            SKILL_EXTRACTION_PROMPT.replace("{resume_text}", truncate_chars(text, MAX_PROMPT_CHARS));
        self.0
            .call_json::<ExtractedSkills>(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Skill extraction failed: {e}")))
    }
}

/// Primary-with-fallback skill extraction.
pub struct SkillPipeline {
    primary: Option<Arc<dyn SkillExtractor>>,
    fallback: KeywordSkillExtractor,
}

impl SkillPipeline {
    pub fn new(fallback: KeywordSkillExtractor) -> Self {
        Self {
            primary: None,
            fallback,
        }
    }

    pub fn with_primary(mut self, primary: Arc<dyn SkillExtractor>) -> Self {
        self.primary = Some(primary);
        self
    }

    /// Label of the backend tried first.
    pub fn primary_backend(&self) -> &'static str {
        self.primary
            .as_ref()
            .map(|p| p.backend())
            .unwrap_or_else(|| self.fallback.backend())
    }

    pub async fn resolve(&self, text: &str) -> ExtractedSkills {
        if let Some(primary) = &self.primary {
            match primary.extract(text).await {
                Ok(skills) => {
                    debug!("Skills extracted by {} backend", primary.backend());
                    return skills;
                }
                Err(e) => warn!(
                    "{} skill extraction failed, falling back to keyword extractor: {e}",
                    primary.backend()
                ),
            }
        }
        self.fallback.extract_skills(text)
    }
}
