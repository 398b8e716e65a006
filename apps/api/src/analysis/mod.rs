// Skill analysis: set-based match against a job skill list, and the composite score.

pub mod handlers;
pub mod matching;
pub mod prompts;
pub mod scoring;
