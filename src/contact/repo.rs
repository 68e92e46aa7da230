use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{ContactMessage, NewContact};

/// Write-only: messages are never read back through the API.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, contact: NewContact) -> anyhow::Result<ContactMessage>;
}

#[derive(Clone)]
pub struct PgContacts {
    db: PgPool,
}

impl PgContacts {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactStore for PgContacts {
    async fn insert(&self, contact: NewContact) -> anyhow::Result<ContactMessage> {
        sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (id, name, email, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.message)
        .fetch_one(&self.db)
        .await
        .context("insert contact message")
    }
}
