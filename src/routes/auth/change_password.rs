use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{
        authorize, Action, ApiError, Credential, Identity, MemberId,
        MemberUpdate, Password, ValidationError,
    },
    routes::MessageResponse,
    utils::auth::authenticated_member,
};

#[tracing::instrument(name = "Change password", skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticated_member(&state, auth.as_ref()).await?;
    authorize(Action::ChangePassword, Some(&Identity::from(&caller)))?;

    let user_id = MemberId::new(request.user_id);
    let member = {
        let store = state.entity_store.read().await;
        store.get_member(user_id).await?
    };

    // The current credential is the real gate here; nothing changes
    // unless it verifies.
    let valid = member
        .credential
        .verify(&request.current_password)
        .await
        .map_err(|e| ApiError::UnexpectedError(e.into()))?;
    if !valid {
        return Err(ApiError::ValidationError(ValidationError::new(
            "Current password is incorrect".to_string(),
        )));
    }

    let new_password = Password::parse(request.new_password)?;
    let credential = Credential::from_password(&new_password)
        .await
        .map_err(|e| ApiError::UnexpectedError(e.into()))?;

    {
        let mut store = state.entity_store.write().await;
        store
            .update_member(
                user_id,
                MemberUpdate {
                    credential: Some(credential),
                    ..Default::default()
                },
            )
            .await?;
    }

    let response = Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub user_id: i64,
    #[serde(rename = "currentPassword")]
    pub current_password: Secret<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Secret<String>,
}
