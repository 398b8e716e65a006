//! Views derived from a stored resume's skills: chart payload, roadmap, interview prep.

pub mod handlers;
pub mod interview;
pub mod report;
pub mod roadmap;
