use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{
        authorize, Action, ApiError, Credential, Email, MemberId,
        MemberUpdate, Password, Role,
    },
    routes::{deserialize_some, parse_date},
    serialization::serialize_member,
};

/// Sparse patch: only supplied fields are overwritten. A supplied
/// password is re-hashed before it is stored.
#[tracing::instrument(name = "Update member", skip_all)]
pub async fn update_member(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::UpdateMember, None)?;

    let mut changes = MemberUpdate {
        username: request.username,
        full_name: request.full_name,
        gender: request.gender,
        member_no: request.member_no,
        member_status: request.member_status,
        id_no: request.id_no,
        address: request.address,
        ..Default::default()
    };
    if let Some(email) = request.email {
        changes.email = Some(Email::parse(Secret::new(email))?);
    }
    if let Some(role) = request.role {
        changes.role = Some(Role::parse(&role)?);
    }
    if let Some(date_of_birth) = request.date_of_birth {
        changes.date_of_birth = Some(parse_date(&date_of_birth)?);
    }
    if let Some(password) = request.password {
        let password = Password::parse(password)?;
        changes.credential = Some(
            Credential::from_password(&password)
                .await
                .map_err(|e| ApiError::UnexpectedError(e.into()))?,
        );
    }

    let body = {
        let mut store = state.entity_store.write().await;
        let member = store
            .update_member(MemberId::new(user_id), changes)
            .await?;
        serialize_member(&*store, &member).await?
    };

    Ok((StatusCode::OK, Json(body)))
}

#[derive(Deserialize)]
pub struct UpdateMemberRequest {
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub member_no: Option<String>,
    pub date_of_birth: Option<String>,
    pub member_status: Option<String>,
    pub id_no: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub address: Option<Option<String>>,
}
