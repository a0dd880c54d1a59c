use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError, ProjectId, ProjectUpdate},
    routes::{deserialize_some, parse_nullable_date},
    serialization::serialize_project,
};

#[tracing::instrument(name = "Update project", skip_all)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::UpdateProject, None)?;

    let changes = ProjectUpdate {
        project_name: request.project_name,
        details: request.details,
        deadline: parse_nullable_date(request.deadline)?,
    };

    let body = {
        let mut store = state.entity_store.write().await;
        let project = store
            .update_project(ProjectId::new(project_id), changes)
            .await?;
        serialize_project(&*store, &project).await?
    };

    Ok((StatusCode::OK, Json(body)))
}

#[derive(Deserialize)]
pub struct UpdateProjectRequest {
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub details: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub deadline: Option<Option<String>>,
}
