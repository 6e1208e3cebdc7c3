use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod email;
pub(crate) mod extractors;
pub mod handlers;
pub mod memory;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn router(login_path: &str) -> Router<AppState> {
    handlers::router(login_path)
}
