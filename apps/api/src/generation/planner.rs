//! Career plan generation: free text in, validated `CareerPlan` out.

use tracing::info;

use crate::errors::AppError;
use crate::generation::executor::{execute, ExecuteOptions};
use crate::generation::prompts::{career_plan_prompt, career_plan_system};
use crate::llm_client::GenerativeBackend;
use crate::models::plan::CareerPlan;
use crate::schema::contracts::career_plan_schema;
use crate::schema::decode;

/// Generates a full plan from the user's self-description.
///
/// Empty input is rejected before any backend call. The plan is accepted whole
/// or not at all.
pub async fn generate_career_plan(
    backend: &dyn GenerativeBackend,
    user_input: &str,
    extended_reasoning: bool,
) -> Result<CareerPlan, AppError> {
    if user_input.trim().is_empty() {
        return Err(AppError::Validation("User input is required.".to_string()));
    }

    let schema = career_plan_schema();
    let raw = execute(
        backend,
        &career_plan_system(),
        &career_plan_prompt(user_input),
        &schema,
        ExecuteOptions { extended_reasoning },
    )
    .await?;

    let plan: CareerPlan = decode(&raw, &schema)?;
    info!(
        "Career plan decoded: {} jobs, {} skills, {} projects",
        plan.job_suggestions.len(),
        plan.skill_recommendations.len(),
        plan.portfolio.projects.len()
    );
    Ok(plan)
}
