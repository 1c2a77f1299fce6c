//! Axum route handlers for outreach content and the career assistant.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::extractor::AuthUser;
use crate::errors::AppError;
use crate::models::chat::ChatMessage;
use crate::models::outreach::OutreachContent;
use crate::outreach::assistant::chat;
use crate::outreach::generator::generate_outreach;
use crate::outreach::prompts::{ASSISTANT_APOLOGY, ASSISTANT_GREETING};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseBody {
    pub response: String,
}

/// GET /api/chat
///
/// The opening model turn a client shows before the first user message.
pub async fn handle_chat_greeting(AuthUser(_user_id): AuthUser) -> Json<ChatResponseBody> {
    Json(ChatResponseBody {
        response: ASSISTANT_GREETING.to_string(),
    })
}

/// POST /api/chat
///
/// The client owns the transcript and sends all of it each turn. A failed
/// backend call answers with the apology turn instead of an error status.
pub async fn handle_chat(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<ChatRequestBody>,
) -> Result<Json<ChatResponseBody>, AppError> {
    let response = match chat(state.backend.as_ref(), &request.messages).await {
        Ok(reply) => reply,
        Err(AppError::Backend(e)) => {
            warn!("Chat reply for user {user_id} failed: {e}");
            ASSISTANT_APOLOGY.to_string()
        }
        Err(e) => return Err(e),
    };
    Ok(Json(ChatResponseBody { response }))
}

/// POST /api/outreach
pub async fn handle_outreach(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<OutreachContent>, AppError> {
    let plan = state
        .plans
        .load_plan(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Generate a career plan before outreach".to_string()))?;

    let content = generate_outreach(state.backend.as_ref(), &plan).await?;
    Ok(Json(content))
}
