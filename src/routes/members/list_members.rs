use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use crate::{
    app_state::AppState,
    domain::{authorize, Action, ApiError},
    serialization::serialize_member,
};

#[tracing::instrument(name = "List members", skip_all)]
pub async fn list_members(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(Action::ReadMember, None)?;

    let store = state.entity_store.read().await;
    let mut body = Vec::new();
    for member in store.list_members().await? {
        body.push(serialize_member(&*store, &member).await?);
    }

    Ok((StatusCode::OK, Json(Value::Array(body))))
}
