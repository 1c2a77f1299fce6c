//! Axum route handlers for the Plan API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::extractor::AuthUser;
use crate::errors::AppError;
use crate::generation::planner::generate_career_plan;
use crate::models::plan::CareerPlan;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    pub user_input: String,
    #[serde(default)]
    pub is_thinking_mode: bool,
}

/// GET /api/plan
///
/// Returns the caller's most recently generated plan, or `null` before the first one.
pub async fn handle_get_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Option<CareerPlan>>, AppError> {
    let plan = state.plans.load_plan(user_id).await?;
    Ok(Json(plan))
}

/// POST /api/plan/generate
///
/// One structured call, decoded and validated, then stored as the caller's plan.
/// Nothing is stored when generation fails.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<GeneratePlanRequest>,
) -> Result<Json<CareerPlan>, AppError> {
    let plan = generate_career_plan(
        state.backend.as_ref(),
        &request.user_input,
        request.is_thinking_mode,
    )
    .await?;

    state.plans.save_plan(user_id, &plan).await?;
    info!("Stored career plan for user {user_id}");

    Ok(Json(plan))
}
