// Career plan generation.
// Structured requests go through `executor`; decoding through `schema::decode`.
// All backend calls go through llm_client, never direct Gemini calls here.

pub mod executor;
pub mod handlers;
pub mod planner;
pub mod prompts;
