use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::plan::CareerPlan;
use crate::storage::{PlanStore, StoreError};

/// Postgres-backed plan store. One JSONB row per user (see `migrations/`).
#[derive(Clone)]
pub struct PgPlanStore {
    pool: PgPool,
}

impl PgPlanStore {
    /// Creates a connection pool and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");

        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn load_plan(&self, user_id: Uuid) -> Result<Option<CareerPlan>, StoreError> {
        let stored: Option<Value> =
            sqlx::query_scalar("SELECT plan FROM career_plans WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        // Annotations are not part of the stored shape, so a loaded plan starts at defaults.
        Ok(stored.map(serde_json::from_value).transpose()?)
    }

    async fn save_plan(&self, user_id: Uuid, plan: &CareerPlan) -> Result<(), StoreError> {
        let value = serde_json::to_value(plan)?;

        sqlx::query(
            r#"
            INSERT INTO career_plans (user_id, plan, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE
                SET plan = EXCLUDED.plan, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(&value)
        .execute(&self.pool)
        .await?;

        info!("Saved career plan for user {}", user_id);
        Ok(())
    }
}
