use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError},
    serialization::serialize_project,
};

#[tracing::instrument(name = "List projects", skip_all)]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::ReadProject, None)?;

    let store = state.entity_store.read().await;
    let mut body = Vec::new();
    for project in store.list_projects().await? {
        body.push(serialize_project(&*store, &project).await?);
    }

    Ok((StatusCode::OK, Json(Value::Array(body))))
}
