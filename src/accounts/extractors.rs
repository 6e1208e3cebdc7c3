use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::accounts::repo_types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticates a request carrying `Authorization: Token <key>` and
/// resolves the owning user.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::NotAuthenticated)?;

        let key = auth
            .strip_prefix("Token ")
            .ok_or(ApiError::NotAuthenticated)?;

        let token = state
            .tokens
            .find_by_key(key)
            .await?
            .ok_or(ApiError::InvalidToken)?;

        let user = state
            .users
            .find_by_id(token.user_id)
            .await?
            .ok_or(ApiError::InvalidToken)?;

        if !user.is_active {
            return Err(ApiError::InactiveUser);
        }

        Ok(CurrentUser(user))
    }
}
