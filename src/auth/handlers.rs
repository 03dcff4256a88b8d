use axum::{
    extract::{Query, State},
    routing::post,
    Form, Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, PublicUser, SignupParams, TokenResponse},
        password::{hash_password_blocking, verify_password_blocking},
        repo_types::User,
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, params), fields(email = %params.email))]
pub async fn signup(
    State(state): State<AppState>,
    Query(params): Query<SignupParams>,
) -> Result<Json<PublicUser>, AppError> {
    if User::find_by_email(&state.db, &params.email).await?.is_some() {
        warn!("email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let hash = hash_password_blocking(params.password).await?;

    // A concurrent signup may still win the race to the unique index.
    let user = User::create(&state.db, &params.email, &hash)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::DuplicateEmail
            }
            _ => AppError::Database(e),
        })?;

    info!(user_id = user.id, "user registered");
    Ok(Json(PublicUser {
        id: user.id,
        email: user.email,
    }))
}

#[instrument(skip(state, form), fields(email = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let Some(user) = User::find_by_email(&state.db, &form.username).await? else {
        warn!("login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password_blocking(form.password, user.hashed_password.clone()).await? {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.keys.issue(user.id)?;
    info!(user_id = user.id, "user logged in");
    Ok(Json(TokenResponse::bearer(token)))
}
