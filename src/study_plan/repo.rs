use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::StudyPlanItem;

#[async_trait]
pub trait StudyPlanStore: Send + Sync {
    async fn insert(&self, owner: Uuid, item: String) -> anyhow::Result<StudyPlanItem>;
    async fn list_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<StudyPlanItem>>;
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgStudyPlan {
    db: PgPool,
}

impl PgStudyPlan {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudyPlanStore for PgStudyPlan {
    async fn insert(&self, owner: Uuid, item: String) -> anyhow::Result<StudyPlanItem> {
        sqlx::query_as::<_, StudyPlanItem>(
            r#"
            INSERT INTO study_plan_items (id, user_id, item)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, item, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(item)
        .fetch_one(&self.db)
        .await
        .context("insert study plan item")
    }

    async fn list_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<StudyPlanItem>> {
        sqlx::query_as::<_, StudyPlanItem>(
            r#"
            SELECT id, user_id, item, created_at
              FROM study_plan_items
             WHERE user_id = $1
             ORDER BY created_at ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.db)
        .await
        .context("list study plan items")
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM study_plan_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.db)
            .await
            .context("delete study plan item")?;
        Ok(res.rows_affected() > 0)
    }
}
