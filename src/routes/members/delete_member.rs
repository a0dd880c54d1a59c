use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError, MemberId},
    routes::MessageResponse,
};

/// Deletion takes the member's owned projects (with their tasks) and
/// assigned tasks along with it, so no row is left pointing nowhere.
#[tracing::instrument(name = "Delete member", skip_all)]
pub async fn delete_member(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::DeleteMember, None)?;

    state
        .entity_store
        .write()
        .await
        .delete_member(MemberId::new(user_id))
        .await?;

    let response = Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    });

    Ok((StatusCode::OK, response))
}
