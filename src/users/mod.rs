use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod store;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/me", get(handlers::get_me))
        .route("/users/me/update", patch(handlers::update_name))
        .route("/users/me/deactivate", delete(handlers::deactivate))
        .route("/users/me/reset-password", post(handlers::reset_password))
}
