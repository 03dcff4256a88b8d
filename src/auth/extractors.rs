use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use super::repo_types::User;
use crate::{
    error::{AppError, AuthFailure},
    state::AppState,
};

/// Outcome of resolving a request's bearer token to a user.
#[derive(Debug)]
pub enum Authentication {
    Authenticated(User),
    Unauthenticated(AuthFailure),
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthFailure> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthFailure::MissingHeader)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthFailure::WrongScheme)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthFailure::WrongScheme);
    }
    Ok(token)
}

/// Resolve the caller. Only a store failure is an `Err`; every other
/// problem is reported as `Unauthenticated`.
pub async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Authentication, AppError> {
    let token = match bearer_token(headers) {
        Ok(t) => t,
        Err(why) => return Ok(Authentication::Unauthenticated(why)),
    };

    let user_id = match state.keys.decode(token) {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, "invalid or expired token");
            return Ok(Authentication::Unauthenticated(AuthFailure::InvalidToken));
        }
    };

    match User::find_by_id(&state.db, user_id).await? {
        Some(user) => Ok(Authentication::Authenticated(user)),
        None => {
            warn!(user_id, "token for unknown user");
            Ok(Authentication::Unauthenticated(AuthFailure::UnknownUser))
        }
    }
}

/// The authenticated caller of a protected route.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match authenticate(state, &parts.headers).await? {
            Authentication::Authenticated(user) => Ok(CurrentUser(user)),
            Authentication::Unauthenticated(why) => Err(AppError::Unauthenticated(why)),
        }
    }
}
