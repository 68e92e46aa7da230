use tracing::info;
use uuid::Uuid;

use super::{dto::CreateStudyPlanItemRequest, repo::StudyPlanStore, repo_types::StudyPlanItem};
use crate::error::{ApiError, ApiResult};

pub async fn add_item(
    items: &dyn StudyPlanStore,
    owner: Uuid,
    req: CreateStudyPlanItemRequest,
) -> ApiResult<StudyPlanItem> {
    let text = req.item.unwrap_or_default().trim().to_string();
    if text.is_empty() {
        return Err(ApiError::validation("item", "Item is required"));
    }
    let item = items.insert(owner, text).await?;
    info!(item_id = %item.id, user_id = %owner, "study plan item created");
    Ok(item)
}

pub async fn list_items(items: &dyn StudyPlanStore, owner: Uuid) -> ApiResult<Vec<StudyPlanItem>> {
    Ok(items.list_by_owner(owner).await?)
}

pub async fn delete_item(items: &dyn StudyPlanStore, owner: Uuid, id: Uuid) -> ApiResult<()> {
    if !items.delete_owned(id, owner).await? {
        return Err(ApiError::NotFoundOrUnauthorized);
    }
    info!(item_id = %id, user_id = %owner, "study plan item deleted");
    Ok(())
}
