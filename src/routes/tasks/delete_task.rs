use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError, TaskId},
    routes::MessageResponse,
};

#[tracing::instrument(name = "Delete task", skip_all)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::DeleteTask, None)?;

    state
        .entity_store
        .write()
        .await
        .delete_task(TaskId::new(task_id))
        .await?;

    let response = Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    });

    Ok((StatusCode::OK, response))
}
