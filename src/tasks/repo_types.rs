use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_name: String,
    pub description: String,
    pub due_date: Option<Date>,
    pub completed: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: Uuid,
    pub task_name: String,
    pub description: String,
    pub due_date: Option<Date>,
}

/// Partial update; `None` leaves the stored value unchanged.
/// `due_date: Some(None)` clears the date.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub task_name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Option<Date>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn apply(self, task: &mut Task) {
        if let Some(name) = self.task_name {
            task.task_name = name;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(due) = self.due_date {
            task.due_date = due;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}
