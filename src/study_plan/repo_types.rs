use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StudyPlanItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item: String,
    pub created_at: OffsetDateTime,
}
