use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo_types::Task;

/// `YYYY-MM-DD` due dates. Also accepts a full RFC 3339 timestamp (its date
/// is kept) and treats an empty string or `null` as "no due date".
pub(crate) mod due_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{
        format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    };

    pub fn parse(raw: &str) -> Result<Option<Date>, time::error::Parse> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        match Date::parse(raw, format_description!("[year]-[month]-[day]")) {
            Ok(day) => Ok(Some(day)),
            Err(_) => OffsetDateTime::parse(raw, &Rfc3339).map(|ts| Some(ts.date())),
        }
    }

    pub fn serialize<S: Serializer>(date: &Option<Date>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => {
                let text = d
                    .format(format_description!("[year]-[month]-[day]"))
                    .map_err(serde::ser::Error::custom)?;
                s.serialize_some(&text)
            }
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw {
            Some(raw) => parse(&raw).map_err(|e| {
                serde::de::Error::custom(format!("dueDate must be YYYY-MM-DD: {e}"))
            }),
            None => Ok(None),
        }
    }

    /// For partial updates: absent stays `None` (via `#[serde(default)]`),
    /// while `null` or `""` becomes `Some(None)` and clears the date.
    pub fn deserialize_patch<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Option<Date>>, D::Error> {
        deserialize(d).map(Some)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub task_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "due_date")]
    pub due_date: Option<Date>,
}

/// Any subset of the editable task fields. Owner and id fields are not part
/// of the schema, so a client cannot move a task to another user.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub task_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "due_date::deserialize_patch")]
    pub due_date: Option<Option<Date>>,
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_name: String,
    pub description: String,
    #[serde(with = "due_date")]
    pub due_date: Option<Date>,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            task_name: t.task_name,
            description: t.description,
            due_date: t.due_date,
            completed: t.completed,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Compact task view used by the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: Uuid,
    pub task_name: String,
    #[serde(with = "due_date")]
    pub due_date: Option<Date>,
    pub completed: bool,
}

impl From<&Task> for TaskSummary {
    fn from(t: &Task) -> Self {
        Self {
            id: t.id,
            task_name: t.task_name.clone(),
            due_date: t.due_date,
            completed: t.completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}
