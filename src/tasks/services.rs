use tracing::info;
use uuid::Uuid;

use super::{
    dto::{CreateTaskRequest, UpdateTaskRequest},
    repo::TaskStore,
    repo_types::{NewTask, Task, TaskPatch},
};
use crate::error::{ApiError, ApiResult, FieldErrors};

fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: Option<String>,
) -> String {
    let value = value.unwrap_or_default().trim().to_string();
    if value.is_empty() {
        errors.add(field, format!("{label} is required"));
    }
    value
}

pub async fn add_task(
    tasks: &dyn TaskStore,
    owner: Uuid,
    req: CreateTaskRequest,
) -> ApiResult<Task> {
    let mut errors = FieldErrors::default();
    let task_name = required_text(&mut errors, "taskName", "Task name", req.task_name);
    let description = required_text(&mut errors, "description", "Description", req.description);
    errors.into_result()?;

    let task = tasks
        .insert(NewTask {
            user_id: owner,
            task_name,
            description,
            due_date: req.due_date,
        })
        .await?;
    info!(task_id = %task.id, user_id = %owner, "task created");
    Ok(task)
}

pub async fn list_tasks(tasks: &dyn TaskStore, owner: Uuid) -> ApiResult<Vec<Task>> {
    Ok(tasks.list_by_owner(owner).await?)
}

pub async fn get_task(tasks: &dyn TaskStore, owner: Uuid, id: Uuid) -> ApiResult<Task> {
    tasks
        .find_owned(id, owner)
        .await?
        .ok_or(ApiError::NotFoundOrUnauthorized)
}

pub async fn update_task(
    tasks: &dyn TaskStore,
    owner: Uuid,
    id: Uuid,
    req: UpdateTaskRequest,
) -> ApiResult<Task> {
    let mut errors = FieldErrors::default();
    let task_name = req
        .task_name
        .map(|v| required_text(&mut errors, "taskName", "Task name", Some(v)));
    let description = req
        .description
        .map(|v| required_text(&mut errors, "description", "Description", Some(v)));
    errors.into_result()?;

    let patch = TaskPatch {
        task_name,
        description,
        due_date: req.due_date,
        completed: req.completed,
    };
    let task = tasks
        .update_owned(id, owner, patch)
        .await?
        .ok_or(ApiError::NotFoundOrUnauthorized)?;
    info!(task_id = %task.id, user_id = %owner, "task updated");
    Ok(task)
}

pub async fn toggle_task(tasks: &dyn TaskStore, owner: Uuid, id: Uuid) -> ApiResult<Task> {
    let task = tasks
        .toggle_owned(id, owner)
        .await?
        .ok_or(ApiError::NotFoundOrUnauthorized)?;
    info!(task_id = %task.id, completed = task.completed, "task toggled");
    Ok(task)
}

pub async fn delete_task(tasks: &dyn TaskStore, owner: Uuid, id: Uuid) -> ApiResult<()> {
    if !tasks.delete_owned(id, owner).await? {
        return Err(ApiError::NotFoundOrUnauthorized);
    }
    info!(task_id = %id, user_id = %owner, "task deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use time::macros::date;

    fn read_chapter() -> CreateTaskRequest {
        CreateTaskRequest {
            task_name: Some("Read".into()),
            description: Some("Chapter 1".into()),
            due_date: Some(date!(2025 - 01 - 01)),
        }
    }

    #[tokio::test]
    async fn created_task_is_listed_incomplete() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let task = add_task(&store, owner, read_chapter()).await.unwrap();

        let listed = list_tasks(&store, owner).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, task.id);
        assert_eq!(listed[0].user_id, owner);
        assert!(!listed[0].completed);
    }

    #[tokio::test]
    async fn toggling_twice_restores_flag() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let task = add_task(&store, owner, read_chapter()).await.unwrap();

        assert!(toggle_task(&store, owner, task.id).await.unwrap().completed);
        assert!(!toggle_task(&store, owner, task.id).await.unwrap().completed);
    }

    #[tokio::test]
    async fn other_owner_gets_not_found_everywhere() {
        let store = MemoryStore::default();
        let ann = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let task = add_task(&store, ann, read_chapter()).await.unwrap();

        assert!(list_tasks(&store, bob).await.unwrap().is_empty());
        assert!(matches!(
            get_task(&store, bob, task.id).await,
            Err(ApiError::NotFoundOrUnauthorized)
        ));
        let mark_done = UpdateTaskRequest {
            completed: Some(true),
            ..Default::default()
        };
        assert!(matches!(
            update_task(&store, bob, task.id, mark_done).await,
            Err(ApiError::NotFoundOrUnauthorized)
        ));
        assert!(matches!(
            toggle_task(&store, bob, task.id).await,
            Err(ApiError::NotFoundOrUnauthorized)
        ));
        assert!(matches!(
            delete_task(&store, bob, task.id).await,
            Err(ApiError::NotFoundOrUnauthorized)
        ));

        let still_there = get_task(&store, ann, task.id).await.unwrap();
        assert!(!still_there.completed);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let task = add_task(&store, owner, read_chapter()).await.unwrap();

        let updated = update_task(
            &store,
            owner,
            task.id,
            UpdateTaskRequest {
                description: Some("Chapter 2".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.task_name, "Read");
        assert_eq!(updated.description, "Chapter 2");
        assert_eq!(updated.due_date, Some(date!(2025 - 01 - 01)));
    }

    #[tokio::test]
    async fn explicit_null_clears_due_date() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let task = add_task(&store, owner, read_chapter()).await.unwrap();

        let cleared = update_task(
            &store,
            owner,
            task.id,
            UpdateTaskRequest {
                due_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cleared.due_date, None);
        assert_eq!(cleared.task_name, "Read");

        let moved = update_task(
            &store,
            owner,
            task.id,
            UpdateTaskRequest {
                due_date: Some(Some(date!(2025 - 02 - 03))),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(moved.due_date, Some(date!(2025 - 02 - 03)));
    }

    #[tokio::test]
    async fn create_reports_all_missing_fields() {
        let store = MemoryStore::default();
        let err = add_task(
            &store,
            Uuid::new_v4(),
            CreateTaskRequest {
                task_name: Some("   ".into()),
                description: None,
                due_date: None,
            },
        )
        .await
        .unwrap_err();
        let ApiError::ValidationFailed(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.get("taskName"), Some("Task name is required"));
        assert_eq!(errors.get("description"), Some("Description is required"));
    }

    #[tokio::test]
    async fn blank_rename_is_rejected() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let task = add_task(&store, owner, read_chapter()).await.unwrap();
        let err = update_task(
            &store,
            owner,
            task.id,
            UpdateTaskRequest {
                task_name: Some(" ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let task = add_task(&store, owner, read_chapter()).await.unwrap();
        delete_task(&store, owner, task.id).await.unwrap();
        assert!(matches!(
            delete_task(&store, owner, task.id).await,
            Err(ApiError::NotFoundOrUnauthorized)
        ));
    }
}
