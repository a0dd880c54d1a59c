use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError, MemberId},
    serialization::serialize_member,
};

#[tracing::instrument(name = "Get member", skip_all)]
pub async fn get_member(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::ReadMember, None)?;

    let store = state.entity_store.read().await;
    let member = store.get_member(MemberId::new(user_id)).await?;
    let body = serialize_member(&*store, &member).await?;

    Ok((StatusCode::OK, Json(body)))
}
