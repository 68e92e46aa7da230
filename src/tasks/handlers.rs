use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateTaskRequest, DeletedResponse, TaskResponse, UpdateTaskRequest},
    services,
};
use crate::{
    auth::AuthUser,
    error::ApiResult,
    extract::{parse_id, AppJson},
    state::AppState,
};

pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/:id",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route("/tasks/:id/toggle", patch(toggle_task))
}

#[instrument(skip(state))]
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = services::list_tasks(state.tasks.as_ref(), user_id).await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

#[instrument(skip(state, body))]
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(body): AppJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let task = services::add_task(state.tasks.as_ref(), user_id, body).await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

#[instrument(skip(state))]
pub async fn get_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let task = services::get_task(state.tasks.as_ref(), user_id, parse_id(&id)?).await?;
    Ok(Json(task.into()))
}

#[instrument(skip(state, body))]
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    AppJson(body): AppJson<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task =
        services::update_task(state.tasks.as_ref(), user_id, parse_id(&id)?, body).await?;
    Ok(Json(task.into()))
}

#[instrument(skip(state))]
pub async fn toggle_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let task = services::toggle_task(state.tasks.as_ref(), user_id, parse_id(&id)?).await?;
    Ok(Json(task.into()))
}

#[instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    services::delete_task(state.tasks.as_ref(), user_id, parse_id(&id)?).await?;
    Ok(Json(DeletedResponse {
        message: "Task deleted successfully",
    }))
}
