use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateStudyPlanItemRequest, StudyPlanItemResponse},
    services,
};
use crate::{
    auth::AuthUser,
    error::ApiResult,
    extract::{parse_id, AppJson},
    state::AppState,
    tasks::dto::DeletedResponse,
};

pub fn study_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/studyplan", get(list_items).post(create_item))
        .route("/studyplan/:id", delete(delete_item))
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<StudyPlanItemResponse>>> {
    let items = services::list_items(state.study_plan.as_ref(), user_id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, body))]
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(body): AppJson<CreateStudyPlanItemRequest>,
) -> ApiResult<(StatusCode, Json<StudyPlanItemResponse>)> {
    let item = services::add_item(state.study_plan.as_ref(), user_id, body).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    services::delete_item(state.study_plan.as_ref(), user_id, parse_id(&id)?).await?;
    Ok(Json(DeletedResponse {
        message: "Study plan item deleted successfully",
    }))
}
