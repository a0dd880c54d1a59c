use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use chrono::Utc;
use color_eyre::eyre::{eyre, Context, ContextCompat, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{ApiError, Member, MemberId},
};

use super::constants::JWT_SECRET;

// This value determines how long an auth token is valid for
pub const TOKEN_TTL_SECONDS: i64 = 600; // 10 minutes

// Create a signed auth token with the member id as subject
#[tracing::instrument(name = "Generating auth token", skip_all)]
pub fn generate_auth_token(member_id: MemberId) -> Result<Secret<String>> {
    let delta = chrono::Duration::try_seconds(TOKEN_TTL_SECONDS)
        .wrap_err("Failed to create 10 minute time delta")?;

    // Create token expiration time
    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(eyre!("failed to add to current time"))?
        .timestamp();

    // Cast exp to a usize, which is what Claims expects
    let exp: usize = exp.try_into().wrap_err(format!(
        "failed to cast exp time to usize. exp time: {}",
        exp
    ))?;

    let claims = Claims {
        sub: member_id.to_string(),
        exp,
    };

    create_token(&claims)
}

// Check whether an auth token is valid by decoding it using the JWT
// secret. Token validity says nothing about whether the subject member
// still exists; callers re-check before trusting the identity.
#[tracing::instrument(name = "Validating auth token", skip_all)]
pub fn validate_token(token: &Secret<String>) -> Result<Claims> {
    decode::<Claims>(
        token.expose_secret(),
        &DecodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .wrap_err("failed to decode token")
}

// Create an auth token by encoding claims using the JWT secret
#[tracing::instrument(name = "Creating auth token", skip_all)]
fn create_token(claims: &Claims) -> Result<Secret<String>> {
    let token_string = encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
    )
    .wrap_err("failed to create token")?;

    Ok(Secret::new(token_string))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

// Pull the bearer token out of the Authorization header
pub fn bearer_token(
    header: Option<&TypedHeader<Authorization<Bearer>>>,
) -> Result<Secret<String>, ApiError> {
    let TypedHeader(Authorization(bearer)) =
        header.ok_or(ApiError::MissingToken)?;
    Ok(Secret::new(bearer.token().to_owned()))
}

// Resolve the Authorization header to a member id without touching the
// store
pub fn authenticated_member_id(
    header: Option<&TypedHeader<Authorization<Bearer>>>,
) -> Result<MemberId, ApiError> {
    let token = bearer_token(header)?;
    let claims = validate_token(&token).map_err(|_| ApiError::InvalidToken)?;
    MemberId::parse(&claims.sub).map_err(|_| ApiError::InvalidToken)
}

// Resolve the Authorization header all the way to the member row. A valid
// token whose subject has since been deleted is a not-found, not an auth
// failure.
#[tracing::instrument(name = "Resolving authenticated member", skip_all)]
pub async fn authenticated_member(
    state: &AppState,
    header: Option<&TypedHeader<Authorization<Bearer>>>,
) -> Result<Member, ApiError> {
    let member_id = authenticated_member_id(header)?;
    let member = state
        .entity_store
        .read()
        .await
        .get_member(member_id)
        .await?;
    Ok(member)
}
