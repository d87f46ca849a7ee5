use axum::{routing::post, Router};

use crate::state::AppState;

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod password;
pub mod tokens;
pub mod validate;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}
