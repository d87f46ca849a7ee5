use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use crate::auth::dto::{
    AccessTokenResponse, LoginRequest, PublicUser, RefreshRequest, RegisterRequest,
    TokenPairResponse,
};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::tokens::{TokenKeys, TokenKind};
use crate::auth::validate::validate_registration;
use crate::errors::ApiError;
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let input = validate_registration(&payload)?;

    let hash = hash_password(&input.password)?;
    let user = state.store.create(&input.name, &input.email, &hash).await?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("email and password are required"));
    }

    // An unknown email and a wrong password are indistinguishable to the
    // caller.
    let user = match state.store.get_by_email(email).await {
        Ok(user) => user,
        Err(ApiError::NotFound(_)) => {
            warn!("login with unknown email");
            return Err(ApiError::auth("invalid credentials"));
        }
        Err(e) => return Err(e),
    };

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::auth("invalid credentials"));
    }

    if user.is_deleted {
        warn!(user_id = %user.id, "login attempt on deactivated account");
        return Err(ApiError::Deactivated);
    }

    let keys = TokenKeys::from_ref(&state);
    let access_token = keys.sign_access(user.id)?;
    let refresh_token = keys.sign_refresh(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenPairResponse {
        access_token,
        refresh_token,
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let keys = TokenKeys::from_ref(&state);
    let user_id = keys.validate(&payload.refresh_token, TokenKind::Refresh)?;

    let access_token = keys.sign_access(user_id)?;

    info!(user_id = %user_id, "access token refreshed");
    Ok(Json(AccessTokenResponse { access_token }))
}
