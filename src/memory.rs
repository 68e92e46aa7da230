use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    auth::{
        repo::UserStore,
        repo_types::{NewUser, User},
    },
    contact::{
        repo::ContactStore,
        repo_types::{ContactMessage, NewContact},
    },
    study_plan::{repo::StudyPlanStore, repo_types::StudyPlanItem},
    tasks::{
        repo::TaskStore,
        repo_types::{NewTask, Task, TaskPatch},
    },
};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    tasks: Vec<Task>,
    study_plan: Vec<StudyPlanItem>,
    contacts: Vec<ContactMessage>,
}

/// Process-local store used by tests and by servers started without `DATABASE_URL`.
///
/// Each operation takes the lock once, so find-and-update style calls are atomic
/// just like their single-statement SQL counterparts.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub async fn contact_count(&self) -> usize {
        self.inner.read().await.contacts.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> anyhow::Result<Option<User>> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.users.push(created.clone());
        Ok(Some(created))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert(&self, task: NewTask) -> anyhow::Result<Task> {
        let now = OffsetDateTime::now_utc();
        let created = Task {
            id: Uuid::new_v4(),
            user_id: task.user_id,
            task_name: task.task_name,
            description: task.description,
            due_date: task.due_date,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.tasks.push(created.clone());
        Ok(created)
    }

    async fn list_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Task>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tasks
            .iter()
            .filter(|t| t.user_id == owner)
            .cloned()
            .collect())
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<Option<Task>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tasks
            .iter()
            .find(|t| t.id == id && t.user_id == owner)
            .cloned())
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: TaskPatch,
    ) -> anyhow::Result<Option<Task>> {
        let mut inner = self.inner.write().await;
        let Some(task) = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner)
        else {
            return Ok(None);
        };
        patch.apply(task);
        task.updated_at = OffsetDateTime::now_utc();
        Ok(Some(task.clone()))
    }

    async fn toggle_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<Option<Task>> {
        let mut inner = self.inner.write().await;
        let Some(task) = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner)
        else {
            return Ok(None);
        };
        task.completed = !task.completed;
        task.updated_at = OffsetDateTime::now_utc();
        Ok(Some(task.clone()))
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| !(t.id == id && t.user_id == owner));
        Ok(inner.tasks.len() < before)
    }
}

#[async_trait]
impl StudyPlanStore for MemoryStore {
    async fn insert(&self, owner: Uuid, item: String) -> anyhow::Result<StudyPlanItem> {
        let created = StudyPlanItem {
            id: Uuid::new_v4(),
            user_id: owner,
            item,
            created_at: OffsetDateTime::now_utc(),
        };
        self.inner.write().await.study_plan.push(created.clone());
        Ok(created)
    }

    async fn list_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<StudyPlanItem>> {
        let inner = self.inner.read().await;
        Ok(inner
            .study_plan
            .iter()
            .filter(|i| i.user_id == owner)
            .cloned()
            .collect())
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> anyhow::Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.study_plan.len();
        inner
            .study_plan
            .retain(|i| !(i.id == id && i.user_id == owner));
        Ok(inner.study_plan.len() < before)
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn insert(&self, contact: NewContact) -> anyhow::Result<ContactMessage> {
        let created = ContactMessage {
            id: Uuid::new_v4(),
            name: contact.name,
            email: contact.email,
            message: contact.message,
            created_at: OffsetDateTime::now_utc(),
        };
        self.inner.write().await.contacts.push(created.clone());
        Ok(created)
    }
}
