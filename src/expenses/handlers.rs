use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{CreateExpenseParams, DeletedResponse, SummaryResponse},
    repo,
    repo_types::Expense,
};
use crate::{auth::CurrentUser, error::AppError, state::AppState};

pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/", get(list_expenses).post(create_expense))
        .route("/expenses/summary", get(summary))
        .route("/expenses/:id", delete(delete_expense))
}

#[instrument(skip(state, user, params), fields(user_id = user.id))]
pub async fn create_expense(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<CreateExpenseParams>,
) -> Result<Json<Expense>, AppError> {
    let expense = repo::create(
        &state.db,
        user.id,
        &params.category,
        params.amount,
        params.comments.as_deref(),
    )
    .await?;
    info!(expense_id = expense.id, category = %expense.category, "expense created");
    Ok(Json(expense))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn list_expenses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Expense>>, AppError> {
    Ok(Json(repo::list_by_owner(&state.db, user.id).await?))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn delete_expense(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>, AppError> {
    if !repo::delete_owned(&state.db, user.id, id).await? {
        warn!(expense_id = id, "expense missing or owned by someone else");
        return Err(AppError::NotFound);
    }
    info!(expense_id = id, "expense deleted");
    Ok(Json(DeletedResponse { ok: true }))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn summary(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<SummaryResponse>, AppError> {
    let totals = repo::totals_by_category(&state.db, user.id).await?;
    Ok(Json(totals.into_iter().collect()))
}
