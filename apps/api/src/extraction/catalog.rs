//! Reference skill lists used by the keyword extractor.
//!
//! A catalog is immutable once built and is injected into the extractor, so tests
//! (and deployments via `SKILL_CATALOG_PATH`) can swap in their own lists.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

const TECHNICAL_SKILLS: &[&str] = &[
    "Python",
    "JavaScript",
    "Java",
    "C++",
    "React",
    "Node.js",
    "SQL",
    "MongoDB",
    "AWS",
    "Docker",
    "Kubernetes",
    "Git",
    "DevOps",
    "Agile",
    "Scrum",
];

const SOFT_SKILLS: &[&str] = &[
    "Leadership",
    "Communication",
    "Teamwork",
    "Problem Solving",
    "Critical Thinking",
    "Adaptability",
    "Time Management",
    "Project Management",
    "Creativity",
    "Analytical Thinking",
];

/// Ordered, case-insensitively deduplicated reference lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCatalog {
    technical: Vec<String>,
    soft: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    technical: Vec<String>,
    soft: Vec<String>,
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::new(TECHNICAL_SKILLS.iter().copied(), SOFT_SKILLS.iter().copied())
    }
}

impl SkillCatalog {
    /// Builds a catalog, keeping the first spelling of each entry and dropping blanks.
    pub fn new<T, S>(technical: T, soft: S) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            technical: dedup_ordered(technical),
            soft: dedup_ordered(soft),
        }
    }

    /// Loads `{ "technical": [...], "soft": [...] }` from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill catalog {}", path.display()))?;
        let file: CatalogFile = serde_json::from_str(&raw)
            .with_context(|| format!("Skill catalog {} is not valid JSON", path.display()))?;
        Ok(Self::new(file.technical, file.soft))
    }

    pub fn technical(&self) -> &[String] {
        &self.technical
    }

    pub fn soft(&self) -> &[String] {
        &self.soft
    }
}

fn dedup_ordered<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(Into::into)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}
