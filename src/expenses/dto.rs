use serde::{Deserialize, Serialize};

use super::repo_types::CategoryTotal;

/// Query parameters for creating an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseParams {
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub ok: bool,
}

/// Category sums as two parallel arrays, ready for a chart.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SummaryResponse {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl FromIterator<CategoryTotal> for SummaryResponse {
    fn from_iter<I: IntoIterator<Item = CategoryTotal>>(iter: I) -> Self {
        let mut out = SummaryResponse::default();
        for row in iter {
            out.labels.push(row.category);
            out.data.push(row.total);
        }
        out
    }
}
