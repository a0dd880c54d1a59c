use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError, Identity, MemberId},
    utils::auth::authenticated_member,
};

#[tracing::instrument(name = "Check session", skip_all)]
pub async fn check_session(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<impl IntoResponse, ApiError> {
    let member = authenticated_member(&state, auth.as_ref()).await?;
    authorize(Action::CheckSession, Some(&Identity::from(&member)))?;

    let response = Json(CheckSessionResponse {
        id: member.id,
        username: member.username,
        role: member.role.as_str().to_string(),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct CheckSessionResponse {
    pub id: MemberId,
    pub username: String,
    pub role: String,
}
