// Skill extraction pipeline: document text -> reference-list matches + certification phrases.
// The keyword extractor is always available; an LLM-backed extractor may sit in front of it.

pub mod catalog;
pub mod certifications;
pub mod keyword;
pub mod models;
pub mod prompts;
pub mod strategy;
pub mod text;
