// Outreach and chat adapters: single-shot calls grounded in a stored plan.

pub mod assistant;
pub mod generator;
pub mod handlers;
pub mod prompts;
