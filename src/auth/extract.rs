use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::auth::tokens::{TokenKeys, TokenKind};
use crate::errors::ApiError;

/// Authenticated caller, resolved from the Authorization header before any
/// protected handler body runs. Handlers receive the identity as a plain
/// parameter instead of looking it up from ambient request context.
#[derive(Debug)]
pub struct AuthUser(pub Uuid);

/// Expects exactly `Bearer <token>`.
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.splitn(2, ' ');
    match (parts.next(), parts.next()) {
        (Some("Bearer"), Some(token)) if !token.is_empty() && !token.contains(' ') => Some(token),
        _ => None,
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = TokenKeys::from_ref(state);

        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::auth("missing Authorization header"))?;

        let token =
            bearer_token(header).ok_or_else(|| ApiError::auth("invalid Authorization header"))?;

        let user_id = keys.validate(token, TokenKind::Access)?;
        Ok(AuthUser(user_id))
    }
}
