use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError},
    serialization::serialize_task,
};

#[tracing::instrument(name = "List tasks", skip_all)]
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::ReadTask, None)?;

    let store = state.entity_store.read().await;
    let body: Vec<Value> =
        store.list_tasks().await?.iter().map(serialize_task).collect();

    Ok((StatusCode::OK, Json(Value::Array(body))))
}
