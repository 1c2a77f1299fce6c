//! Structured Request Executor: one schema-constrained call, raw text back.
//!
//! The only observable effect of `extended_reasoning` is model selection plus the
//! reasoning budget. Errors propagate unchanged; nothing here retries or interprets.

use tracing::info;

use crate::llm_client::{
    GenerativeBackend, LlmError, StructuredRequest, DEFAULT_MODEL, REASONING_BUDGET,
    REASONING_MODEL,
};
use crate::schema::Schema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub extended_reasoning: bool,
}

/// Backend model variant and its optional reasoning budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSelection {
    pub model: &'static str,
    pub reasoning_budget: Option<u32>,
}

pub fn select_model(options: ExecuteOptions) -> ModelSelection {
    if options.extended_reasoning {
        ModelSelection {
            model: REASONING_MODEL,
            reasoning_budget: Some(REASONING_BUDGET),
        }
    } else {
        ModelSelection {
            model: DEFAULT_MODEL,
            reasoning_budget: None,
        }
    }
}

/// Sends exactly one structured request and returns the backend's raw text.
pub async fn execute(
    backend: &dyn GenerativeBackend,
    system_instruction: &str,
    user_prompt: &str,
    schema: &Schema,
    options: ExecuteOptions,
) -> Result<String, LlmError> {
    let selection = select_model(options);
    info!(
        "Structured request for {} (model: {}, reasoning_budget: {:?})",
        schema.name, selection.model, selection.reasoning_budget
    );

    let request = StructuredRequest {
        model: selection.model,
        system_instruction: system_instruction.to_string(),
        prompt: user_prompt.to_string(),
        schema: schema.to_backend_schema(),
        reasoning_budget: selection.reasoning_budget,
    };

    backend.generate(&request).await
}
