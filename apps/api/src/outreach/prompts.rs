// Prompt text for outreach generation and the career assistant.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::models::plan::CareerPlan;

const OUTREACH_ROLE: &str = "You are a career coach and networking expert. \
Based on the user's career plan, generate tailored content for professional outreach. \
The tone should be confident, professional, and approachable.";

pub fn outreach_system() -> String {
    format!("{OUTREACH_ROLE} {JSON_ONLY_INSTRUCTION}")
}

/// Number of suggested jobs named as target roles.
const TARGET_ROLE_COUNT: usize = 2;

pub fn outreach_prompt(plan: &CareerPlan) -> String {
    format!(
        "Here is the user's career plan. Generate an elevator pitch, a LinkedIn connection request message, \
and an informational interview request email based on this information.
---
Resume Summary: {}
Career Goals: {}
Target Roles: {}
---",
        plan.resume.summary,
        plan.career_goals_line(),
        plan.target_roles(TARGET_ROLE_COUNT).join(", ")
    )
}

pub const ASSISTANT_SYSTEM: &str =
    "You are a friendly and helpful career assistant chatbot for CareerCraft AI.";

/// Opening line a client shows before the first user message.
pub const ASSISTANT_GREETING: &str = "Hello! How can I help with your career questions today?";

/// Reply sent in place of a failed chat call.
pub const ASSISTANT_APOLOGY: &str = "Sorry, I encountered an error. Please try again.";
