use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError, ProjectId},
    serialization::serialize_project,
};

#[tracing::instrument(name = "Get project", skip_all)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::ReadProject, None)?;

    let store = state.entity_store.read().await;
    let project = store.get_project(ProjectId::new(project_id)).await?;
    let body = serialize_project(&*store, &project).await?;

    Ok((StatusCode::OK, Json(body)))
}
