use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use super::{
    dto::{ContactRequest, ContactResponse},
    services,
};
use crate::{error::ApiResult, extract::AppJson, state::AppState};

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit_contact))
}

#[instrument(skip(state, body))]
pub async fn submit_contact(
    State(state): State<AppState>,
    AppJson(body): AppJson<ContactRequest>,
) -> ApiResult<Json<ContactResponse>> {
    services::submit(state.contacts.as_ref(), body).await?;
    Ok(Json(ContactResponse {
        message: "Message sent successfully!",
    }))
}
