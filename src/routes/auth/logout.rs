use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError, Identity},
    utils::auth::authenticated_member,
};

/// Tokens stay valid until expiry; logging out is the client discarding
/// its copy, so there is nothing to revoke here.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<impl IntoResponse, ApiError> {
    let member = authenticated_member(&state, auth.as_ref()).await?;
    authorize(Action::Logout, Some(&Identity::from(&member)))?;

    Ok(StatusCode::NO_CONTENT)
}
