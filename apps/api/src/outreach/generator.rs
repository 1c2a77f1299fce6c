//! Outreach generation: one structured call, decoded against the outreach contract.

use tracing::info;

use crate::errors::AppError;
use crate::generation::executor::{execute, ExecuteOptions};
use crate::llm_client::GenerativeBackend;
use crate::models::outreach::OutreachContent;
use crate::models::plan::CareerPlan;
use crate::outreach::prompts::{outreach_prompt, outreach_system};
use crate::schema::contracts::outreach_schema;
use crate::schema::decode;

pub async fn generate_outreach(
    backend: &dyn GenerativeBackend,
    plan: &CareerPlan,
) -> Result<OutreachContent, AppError> {
    let schema = outreach_schema();
    let raw = execute(
        backend,
        &outreach_system(),
        &outreach_prompt(plan),
        &schema,
        ExecuteOptions::default(),
    )
    .await?;

    let content = decode(&raw, &schema)?;
    info!("Outreach content generated for {}", plan.resume.name);
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::ScriptedBackend;
    use crate::llm_client::DEFAULT_MODEL;
    use crate::models::plan::fixtures::plan_json;

    fn plan() -> CareerPlan {
        serde_json::from_value(plan_json()).unwrap()
    }

    #[tokio::test]
    async fn test_generates_outreach() {
        let backend = ScriptedBackend::new().reply(
            r#"{"elevatorPitch": "pitch", "linkedinMessage": "msg", "informationalInterviewEmail": "email"}"#,
        );

        let content = generate_outreach(&backend, &plan()).await.unwrap();

        assert_eq!(content.elevator_pitch, "pitch");
        let sent = backend.structured_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].model, DEFAULT_MODEL);
        assert_eq!(sent[0].reasoning_budget, None);
        assert!(sent[0].prompt.contains("Target Roles:"));
    }

    #[tokio::test]
    async fn test_missing_field_is_decoding_error() {
        let backend = ScriptedBackend::new().reply(r#"{"elevatorPitch": "pitch"}"#);

        let err = generate_outreach(&backend, &plan()).await.unwrap_err();

        assert!(matches!(err, AppError::Decoding(_)));
        assert_eq!(backend.structured_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_backend_failure_is_single_error() {
        let backend = ScriptedBackend::new().fail(429);

        let err = generate_outreach(&backend, &plan()).await.unwrap_err();

        assert!(matches!(err, AppError::Backend(_)));
    }
}
