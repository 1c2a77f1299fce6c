//! Open-ended career chat. Free text in both directions, no schema.

use crate::errors::AppError;
use crate::llm_client::{ChatRequest, GenerativeBackend, DEFAULT_MODEL};
use crate::models::chat::ChatMessage;
use crate::outreach::prompts::ASSISTANT_SYSTEM;

/// Sends all but the last entry as history and the last entry as the new message.
/// The reply is returned as-is; rendering an apology on failure is the caller's job.
pub async fn chat(
    backend: &dyn GenerativeBackend,
    transcript: &[ChatMessage],
) -> Result<String, AppError> {
    let Some((last, history)) = transcript.split_last() else {
        return Err(AppError::Validation("Messages are required.".to_string()));
    };

    let request = ChatRequest {
        model: DEFAULT_MODEL,
        system_instruction: ASSISTANT_SYSTEM.to_string(),
        history: history.to_vec(),
        message: last.content.clone(),
    };

    Ok(backend.chat(&request).await?)
}
