use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewTask, Task, TaskPatch};

/// Task persistence. Every lookup past `insert` is keyed by `(id, owner)`;
/// a task owned by someone else behaves exactly like a missing one.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, task: NewTask) -> anyhow::Result<Task>;
    async fn list_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Task>>;
    async fn find_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<Option<Task>>;
    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: TaskPatch,
    ) -> anyhow::Result<Option<Task>>;
    async fn toggle_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<Option<Task>>;
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgTasks {
    db: PgPool,
}

impl PgTasks {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const TASK_COLUMNS: &str =
    "id, user_id, task_name, description, due_date, completed, created_at, updated_at";

#[async_trait]
impl TaskStore for PgTasks {
    async fn insert(&self, task: NewTask) -> anyhow::Result<Task> {
        let sql = format!(
            "INSERT INTO tasks (id, user_id, task_name, description, due_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(Uuid::new_v4())
            .bind(task.user_id)
            .bind(&task.task_name)
            .bind(&task.description)
            .bind(task.due_date)
            .fetch_one(&self.db)
            .await
            .context("insert task")
    }

    async fn list_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Task>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS}
             FROM tasks
             WHERE user_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(owner)
            .fetch_all(&self.db)
            .await
            .context("list tasks by owner")
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<Option<Task>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS}
             FROM tasks
             WHERE id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.db)
            .await
            .context("find owned task")
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: TaskPatch,
    ) -> anyhow::Result<Option<Task>> {
        let sql = format!(
            "UPDATE tasks
                SET task_name   = COALESCE($3, task_name),
                    description = COALESCE($4, description),
                    due_date    = CASE WHEN $7 THEN $5 ELSE due_date END,
                    completed   = COALESCE($6, completed),
                    updated_at  = now()
              WHERE id = $1 AND user_id = $2
          RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(owner)
            .bind(patch.task_name)
            .bind(patch.description)
            .bind(patch.due_date.flatten())
            .bind(patch.completed)
            .bind(patch.due_date.is_some())
            .fetch_optional(&self.db)
            .await
            .context("update owned task")
    }

    async fn toggle_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<Option<Task>> {
        let sql = format!(
            "UPDATE tasks
                SET completed = NOT completed,
                    updated_at = now()
              WHERE id = $1 AND user_id = $2
          RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.db)
            .await
            .context("toggle owned task")
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.db)
            .await
            .context("delete owned task")?;
        Ok(res.rows_affected() > 0)
    }
}
