use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{
    auth::{dto::Profile, services::get_profile, AuthUser},
    error::ApiResult,
    state::AppState,
    study_plan::dto::StudyPlanItemResponse,
    tasks::{dto::TaskSummary, repo_types::Task},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOverview {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub items: Vec<TaskSummary>,
}

impl TaskOverview {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
            items: tasks.iter().map(TaskSummary::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user: Profile,
    pub study_plan: Vec<StudyPlanItemResponse>,
    pub tasks: TaskOverview,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<DashboardResponse>> {
    let user = get_profile(state.users.as_ref(), user_id).await?;
    let study_plan = state.study_plan.list_by_owner(user_id).await?;
    let tasks = state.tasks.list_by_owner(user_id).await?;

    Ok(Json(DashboardResponse {
        user: user.into(),
        study_plan: study_plan.into_iter().map(Into::into).collect(),
        tasks: TaskOverview::from_tasks(&tasks),
    }))
}
