use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{
        authorize, Action, ApiError, Identity, MemberId, NewTask, ProjectId,
        TaskStatus,
    },
    routes::parse_date,
    serialization::serialize_task,
    utils::auth::authenticated_member,
};

/// Any authenticated member may create a task, but both referenced rows
/// must exist.
#[tracing::instrument(name = "Create new task", skip_all)]
pub async fn new_task(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(request): Json<NewTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member = authenticated_member(&state, auth.as_ref()).await?;
    authorize(Action::CreateTask, Some(&Identity::from(&member)))?;

    let status =
        TaskStatus::parse(request.status.as_deref().unwrap_or("pending"))?;
    let deadline = request.deadline.as_deref().map(parse_date).transpose()?;

    let new_task = NewTask {
        task_name: request.task_name,
        description: request.description,
        status,
        deadline,
        project_id: ProjectId::new(request.project_id),
        assigned_member_id: MemberId::new(request.assigned_member_id),
    };

    let task = {
        let mut store = state.entity_store.write().await;
        store.add_task(new_task).await?
    };

    Ok((StatusCode::CREATED, Json(serialize_task(&task))))
}

#[derive(Deserialize)]
pub struct NewTaskRequest {
    pub task_name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<String>,
    pub project_id: i64,
    pub assigned_member_id: i64,
}
