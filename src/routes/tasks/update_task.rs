use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{
        authorize, Action, ApiError, MemberId, ProjectId, TaskId, TaskStatus,
        TaskUpdate,
    },
    routes::{deserialize_some, parse_nullable_date},
    serialization::serialize_task,
};

/// Sparse patch; any status may follow any other. Reassigning a foreign
/// key only succeeds when the new target exists.
#[tracing::instrument(name = "Update task", skip_all)]
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::UpdateTask, None)?;

    let mut changes = TaskUpdate {
        task_name: request.task_name,
        description: request.description,
        deadline: parse_nullable_date(request.deadline)?,
        project_id: request.project_id.map(ProjectId::new),
        assigned_member_id: request.assigned_member_id.map(MemberId::new),
        ..Default::default()
    };
    if let Some(status) = request.status {
        changes.status = Some(TaskStatus::parse(&status)?);
    }

    let task = {
        let mut store = state.entity_store.write().await;
        store.update_task(TaskId::new(task_id), changes).await?
    };

    Ok((StatusCode::OK, Json(serialize_task(&task))))
}

#[derive(Deserialize)]
pub struct UpdateTaskRequest {
    pub task_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub deadline: Option<Option<String>>,
    pub project_id: Option<i64>,
    pub assigned_member_id: Option<i64>,
}
