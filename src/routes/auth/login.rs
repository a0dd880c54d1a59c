use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError},
    utils::auth::generate_auth_token,
};

/// An unknown username is a 404, a wrong password a 401; the two are
/// deliberately distinguishable.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::Login, None)?;

    let member = {
        let store = state.entity_store.read().await;
        store.get_member_by_username(&request.username).await?
    };

    let valid = member
        .credential
        .verify(&request.password)
        .await
        .map_err(|e| ApiError::UnexpectedError(e.into()))?;
    if !valid {
        return Err(ApiError::IncorrectCredentials);
    }

    let token =
        generate_auth_token(member.id).map_err(ApiError::UnexpectedError)?;

    let response = Json(LoginResponse {
        token: token.expose_secret().to_owned(),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: Secret<String>,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct LoginResponse {
    pub token: String,
}
