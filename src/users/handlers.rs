use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{info, instrument, warn};

use crate::auth::extract::AuthUser;
use crate::auth::password::{hash_password, verify_password};
use crate::errors::ApiError;
use crate::state::AppState;
use crate::users::dto::{
    ListQuery, MessageResponse, ProfileResponse, ResetPasswordRequest, UpdateNameRequest,
    UserListResponse, UserSummary,
};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

/// page/limit fall back to 1/10 when absent or non-positive.
fn normalize_page(query: &ListQuery) -> (i64, i64) {
    let page = match query.page {
        Some(page) if page >= 1 => page,
        _ => DEFAULT_PAGE,
    };
    let limit = match query.limit {
        Some(limit) if limit >= 1 => limit,
        _ => DEFAULT_LIMIT,
    };
    (page, limit)
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<UserListResponse>, ApiError> {
    let (page, limit) = normalize_page(&query);
    let offset = (page - 1) * limit;

    let (users, total_users) = state.store.list_active(limit, offset).await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(UserSummary::from).collect(),
        total_users,
        page,
        limit,
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state.store.get_by_id(user_id).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_name(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateNameRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(ApiError::validation("name is required"));
    }

    state.store.update_name(user_id, name).await?;
    let user = state.store.get_by_id(user_id).await?;

    info!(user_id = %user_id, "profile name updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn deactivate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.soft_delete(user_id).await?;

    info!(user_id = %user_id, "account deactivated");
    Ok(Json(MessageResponse {
        message: "user deactivated successfully".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if payload.old_password.is_empty() || payload.new_password.is_empty() {
        return Err(ApiError::validation(
            "both old and new passwords are required",
        ));
    }
    let new_password = payload.new_password.trim();
    if new_password.chars().count() < 6 {
        return Err(ApiError::validation(
            "password must be at least 6 characters long",
        ));
    }

    let current_hash = state.store.get_password_hash(user_id).await?;
    if !verify_password(&payload.old_password, &current_hash) {
        warn!(user_id = %user_id, "password reset with incorrect old password");
        return Err(ApiError::auth("incorrect old password"));
    }

    let new_hash = hash_password(new_password)?;
    state.store.update_password_hash(user_id, &new_hash).await?;

    info!(user_id = %user_id, "password updated");
    Ok(Json(MessageResponse {
        message: "password updated successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<i64>, limit: Option<i64>) -> ListQuery {
        ListQuery { page, limit }
    }

    #[test]
    fn pagination_defaults_when_absent() {
        assert_eq!(normalize_page(&query(None, None)), (1, 10));
    }

    #[test]
    fn pagination_defaults_when_non_positive() {
        assert_eq!(normalize_page(&query(Some(0), Some(-3))), (1, 10));
        assert_eq!(normalize_page(&query(Some(-1), Some(0))), (1, 10));
    }

    #[test]
    fn pagination_passes_through_valid_values() {
        assert_eq!(normalize_page(&query(Some(2), Some(5))), (2, 5));
    }

    #[test]
    fn offset_follows_page_and_limit() {
        let (page, limit) = normalize_page(&query(Some(3), Some(5)));
        assert_eq!((page - 1) * limit, 10);
    }
}
