//! Keyword skill extractor: reference-list substring matching + certification phrases.
//!
//! Pure and deterministic. This is the fallback behind every other extractor backend,
//! so it must never fail: any string in, a complete `ExtractedSkills` out.

use crate::extraction::catalog::SkillCatalog;
use crate::extraction::certifications::{find_certifications, CaptureMode};
use crate::extraction::models::ExtractedSkills;

#[derive(Debug, Clone, Default)]
pub struct KeywordSkillExtractor {
    catalog: SkillCatalog,
    capture: CaptureMode,
}

impl KeywordSkillExtractor {
    pub fn new(catalog: SkillCatalog, capture: CaptureMode) -> Self {
        Self { catalog, capture }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// Matches reference entries case-insensitively (reference order, reference casing)
    /// and collects certification phrases from the original-case text.
    pub fn extract_skills(&self, text: &str) -> ExtractedSkills {
        let text_lower = text.to_lowercase();
        ExtractedSkills {
            technical_skills: match_reference(self.catalog.technical(), &text_lower),
            soft_skills: match_reference(self.catalog.soft(), &text_lower),
            certifications: find_certifications(text, self.capture),
        }
    }
}

fn match_reference(reference: &[String], text_lower: &str) -> Vec<String> {
    reference
        .iter()
        .filter(|skill| text_lower.contains(&skill.to_lowercase()))
        .cloned()
        .collect()
}
