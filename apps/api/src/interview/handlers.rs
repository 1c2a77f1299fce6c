//! Axum route handlers for the mock interview.
//!
//! Every handler answers with the session view, so the client re-renders from
//! one shape. Backend failures inside a turn land in the transcript, not in the
//! HTTP status.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::errors::AppError;
use crate::interview::registry::SessionView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// GET /api/interview
pub async fn handle_get_interview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Json<SessionView> {
    Json(state.interviews.view(user_id))
}

/// POST /api/interview/start
///
/// Needs a stored plan; the interviewer is primed with its career goals.
pub async fn handle_start_interview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<SessionView>, AppError> {
    let plan = state
        .plans
        .load_plan(user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Generate a career plan before starting an interview".to_string())
        })?;

    let pending = state.interviews.begin_start(user_id, &plan)?;
    let view = state
        .interviews
        .drive(state.backend.clone(), user_id, pending)
        .await?;
    Ok(Json(view))
}

/// POST /api/interview/answer
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    let pending = state.interviews.begin_answer(user_id, &request.answer)?;
    let view = state
        .interviews
        .drive(state.backend.clone(), user_id, pending)
        .await?;
    Ok(Json(view))
}

/// POST /api/interview/reset
pub async fn handle_reset_interview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Json<SessionView> {
    Json(state.interviews.reset(user_id))
}
