use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{
        authorize, Action, ApiError, Credential, Email, NewMember, Password,
        Role,
    },
    routes::parse_date,
    serialization::serialize_member,
};

/// Admin-style creation. Unlike signup this route answers with the
/// serialized member rather than a token, and its historical role default
/// is "user" — a value outside the role enum, so a request without an
/// explicit role is always rejected.
#[tracing::instrument(name = "Create new member", skip_all)]
pub async fn new_member(
    State(state): State<AppState>,
    Json(request): Json<NewMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::CreateMember, None)?;

    let email = Email::parse(Secret::new(request.email))?;
    let password = Password::parse(request.password)?;
    let role = Role::parse(request.role.as_deref().unwrap_or("user"))?;
    let date_of_birth = parse_date(&request.date_of_birth)?;
    let credential = Credential::from_password(&password)
        .await
        .map_err(|e| ApiError::UnexpectedError(e.into()))?;

    let new_member = NewMember {
        username: request.username,
        full_name: request.full_name,
        email,
        role,
        gender: request.gender,
        member_no: request.member_no,
        date_of_birth,
        member_status: request
            .member_status
            .unwrap_or_else(|| "active".to_string()),
        id_no: request.id_no,
        address: request.address,
        credential,
    };

    let body = {
        let mut store = state.entity_store.write().await;
        let member = store.add_member(new_member).await?;
        serialize_member(&*store, &member).await?
    };

    Ok((StatusCode::CREATED, Json(body)))
}

#[derive(Deserialize)]
pub struct NewMemberRequest {
    pub username: String,
    pub password: Secret<String>,
    pub email: String,
    pub full_name: String,
    pub gender: String,
    pub member_no: String,
    pub date_of_birth: String,
    pub id_no: String,
    pub address: Option<String>,
    pub role: Option<String>,
    pub member_status: Option<String>,
}
