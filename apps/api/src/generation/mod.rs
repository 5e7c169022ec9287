// Outfit generation pipeline.
// Implements: prompt construction, model call, response validation,
// deterministic fallback, and hand-off to catalog enrichment.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod response;
