use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::StudyPlanItem;

#[derive(Debug, Deserialize)]
pub struct CreateStudyPlanItemRequest {
    #[serde(default)]
    pub item: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlanItemResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<StudyPlanItem> for StudyPlanItemResponse {
    fn from(i: StudyPlanItem) -> Self {
        Self {
            id: i.id,
            user_id: i.user_id,
            item: i.item,
            created_at: i.created_at,
        }
    }
}
