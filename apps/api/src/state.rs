use std::sync::Arc;

use crate::auth::TokenConfig;
use crate::interview::registry::InterviewRegistry;
use crate::llm_client::GenerativeBackend;
use crate::storage::PlanStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generative backend. `GeminiClient` in production, scripted in tests.
    pub backend: Arc<dyn GenerativeBackend>,
    pub plans: Arc<dyn PlanStore>,
    pub tokens: TokenConfig,
    pub interviews: InterviewRegistry,
}
