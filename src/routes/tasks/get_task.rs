use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError, TaskId},
    serialization::serialize_task,
};

#[tracing::instrument(name = "Get task", skip_all)]
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::ReadTask, None)?;

    let task = {
        let store = state.entity_store.read().await;
        store.get_task(TaskId::new(task_id)).await?
    };

    Ok((StatusCode::OK, Json(serialize_task(&task))))
}
