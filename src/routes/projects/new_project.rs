use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError, Identity, NewProject},
    routes::parse_date,
    serialization::serialize_project,
    utils::auth::authenticated_member,
};

/// Only project owners may create projects; ownership lands on the
/// authenticated member itself.
#[tracing::instrument(name = "Create new project", skip_all)]
pub async fn new_project(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(request): Json<NewProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member = authenticated_member(&state, auth.as_ref()).await?;
    authorize(Action::CreateProject, Some(&Identity::from(&member)))?;

    let deadline = request.deadline.as_deref().map(parse_date).transpose()?;
    let new_project = NewProject {
        project_name: request.project_name,
        details: request.details,
        deadline,
        owner_id: member.id,
    };

    let body = {
        let mut store = state.entity_store.write().await;
        let project = store.add_project(new_project).await?;
        serialize_project(&*store, &project).await?
    };

    Ok((StatusCode::CREATED, Json(body)))
}

#[derive(Deserialize)]
pub struct NewProjectRequest {
    pub project_name: String,
    pub details: Option<String>,
    pub deadline: Option<String>,
}
