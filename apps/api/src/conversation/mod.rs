// Chat pipeline: prompt assembly → remote completion → local fallback.
// All LLM calls go through llm_client.

pub mod builder;
pub mod fallback;
pub mod handlers;
pub mod prompts;
pub mod responder;
