// Shared prompt fragments for the LLM client.
// Feature modules keep their own prompts.rs next to the code that uses them.

/// System instruction sent with every structured (JSON-mode) call.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
