use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{
        authorize, Action, ApiError, Credential, Email, NewMember, Password,
        Role,
    },
    routes::parse_date,
    utils::auth::generate_auth_token,
};

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::Signup, None)?;

    let email = Email::parse(Secret::new(request.email))?;
    let password = Password::parse(request.password)?;
    let role = Role::parse(request.role.as_deref().unwrap_or("member"))?;
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
            .unwrap_or_else(|| "inactive".to_string()),
        id_no: request.id_no,
        address: request.address,
        credential,
    };

    let member = {
        let mut store = state.entity_store.write().await;
        store.add_member(new_member).await?
    };

    let token =
        generate_auth_token(member.id).map_err(ApiError::UnexpectedError)?;

    let response = Json(SignupResponse {
        token: token.expose_secret().to_owned(),
    });

    Ok((StatusCode::CREATED, response))
}

#[derive(Deserialize)]
pub struct SignupRequest {
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

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct SignupResponse {
    pub token: String,
}
