//! Plan persistence collaborator: `load_plan` / `save_plan`, keyed by user id.

pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::plan::CareerPlan;

pub use postgres::PgPlanStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored plan is not valid: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Stores the latest plan per user. A save replaces the previous plan whole.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn load_plan(&self, user_id: Uuid) -> Result<Option<CareerPlan>, StoreError>;

    async fn save_plan(&self, user_id: Uuid, plan: &CareerPlan) -> Result<(), StoreError>;
}
