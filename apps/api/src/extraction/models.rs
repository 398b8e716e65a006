use serde::{Deserialize, Serialize};

/// Skills detected in one document. Every extractor backend produces exactly this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSkills {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub certifications: Vec<String>,
}

/// List lengths fed to the heuristic scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkillCounts {
    pub technical: usize,
    pub soft: usize,
    pub certifications: usize,
}

impl ExtractedSkills {
    pub fn counts(&self) -> SkillCounts {
        SkillCounts {
            technical: self.technical_skills.len(),
            soft: self.soft_skills.len(),
            certifications: self.certifications.len(),
        }
    }
}
