use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, Profile, RegisterRequest, RegisterResponse},
        extractors::AuthUser,
        services,
    },
    error::ApiResult,
    extract::AppJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let user = services::register(state.users.as_ref(), payload).await?;
    let token = state.jwt.issue(user.id)?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { token })))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user =
        services::authenticate(state.users.as_ref(), &payload.email, &payload.password).await?;
    let token = state.jwt.issue(user.id)?;
    Ok(Json(LoginResponse {
        token,
        username: user.name,
        message: "Login successful",
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Profile>> {
    let user = services::get_profile(state.users.as_ref(), user_id).await?;
    Ok(Json(user.into()))
}
