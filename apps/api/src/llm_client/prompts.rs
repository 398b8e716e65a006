// Shared prompt fragments. Each collaborator keeps its own prompts.rs next to it.

/// System prompt that forces a bare JSON reply.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise resume-analysis assistant. \
    Respond with a single valid JSON object only. \
    No prose, no markdown code fences, no explanations.";
