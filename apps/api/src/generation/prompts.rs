// Prompt text for career plan generation.

use crate::llm_client::prompts::{fenced_user_text, JSON_ONLY_INSTRUCTION};

const CAREER_PLAN_ROLE: &str = "You are CareerCraft AI, an expert career advisor. \
Analyze the user's background and goals to generate a comprehensive career plan. \
Crucially, derive 2-4 detailed portfolio projects directly from the user's work experience in their resume. \
For each project, provide:
1. A project name.
2. A detailed description of the project.
3. The user's specific role and key contributions.
4. The tangible outcome or impact of the project (e.g., increased efficiency, user growth).
5. The technologies used.
6. For the 'imageUrl', generate a highly relevant placeholder URL from a service like picsum.photos \
using a descriptive, URL-friendly seed based on the project content \
(e.g., 'https://picsum.photos/seed/finance-dashboard-ui/1920/1080'). Use high resolution images (e.g., 1920/1080).
If the user mentions preferences like remote work, relocation, company culture, certifications, \
methodologies, community contributions, or specific career goals, include these in the appropriate \
sections of the resume.";

/// System instruction for plan generation.
pub fn career_plan_system() -> String {
    format!("{CAREER_PLAN_ROLE} {JSON_ONLY_INSTRUCTION}")
}

pub fn career_plan_prompt(user_input: &str) -> String {
    format!(
        "Based on the following user description, please generate a complete career plan. \
        Be thorough and professional.\n\n{}",
        fenced_user_text(user_input)
    )
}
