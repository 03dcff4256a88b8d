use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Expense record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub category: String,
    pub amount: f64,
    pub comments: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub owner_id: i64,
}

/// One row of the per-category aggregation.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}
