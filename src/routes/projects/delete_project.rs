use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError, ProjectId},
    routes::MessageResponse,
};

/// Deleting a project removes every task under it in the same atomic
/// operation.
#[tracing::instrument(name = "Delete project", skip_all)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::DeleteProject, None)?;

    state
        .entity_store
        .write()
        .await
        .delete_project(ProjectId::new(project_id))
        .await?;

    let response = Json(MessageResponse {
        message: "Project deleted successfully".to_string(),
    });

    Ok((StatusCode::OK, response))
}
