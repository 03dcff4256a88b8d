use sqlx::SqlitePool;

use super::repo_types::{CategoryTotal, Expense};

const EXPENSE_COLUMNS: &str = "id, category, amount, comments, created_at, updated_at, owner_id";

/// Insert an expense for `owner_id`; the store stamps both timestamps.
pub async fn create(
    db: &SqlitePool,
    owner_id: i64,
    category: &str,
    amount: f64,
    comments: Option<&str>,
) -> sqlx::Result<Expense> {
    let sql = format!(
        "INSERT INTO expenses (category, amount, comments, owner_id) VALUES (?, ?, ?, ?) RETURNING {EXPENSE_COLUMNS}"
    );
    sqlx::query_as::<_, Expense>(&sql)
        .bind(category)
        .bind(amount)
        .bind(comments)
        .bind(owner_id)
        .fetch_one(db)
        .await
}

/// All of the owner's expenses, newest first.
pub async fn list_by_owner(db: &SqlitePool, owner_id: i64) -> sqlx::Result<Vec<Expense>> {
    let sql = format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE owner_id = ? ORDER BY created_at DESC, id DESC"
    );
    sqlx::query_as::<_, Expense>(&sql)
        .bind(owner_id)
        .fetch_all(db)
        .await
}

/// Delete an expense only if `owner_id` owns it. Returns whether a row went away.
pub async fn delete_owned(db: &SqlitePool, owner_id: i64, expense_id: i64) -> sqlx::Result<bool> {
    let res = sqlx::query("DELETE FROM expenses WHERE id = ? AND owner_id = ?")
        .bind(expense_id)
        .bind(owner_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

/// Sum of amounts per category for one owner, in the store's grouping order.
pub async fn totals_by_category(db: &SqlitePool, owner_id: i64) -> sqlx::Result<Vec<CategoryTotal>> {
    sqlx::query_as::<_, CategoryTotal>(
        r#"
        SELECT category, TOTAL(amount) AS total
        FROM expenses
        WHERE owner_id = ?
        GROUP BY category
        "#,
    )
    .bind(owner_id)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::auth::User;
    use crate::db::connect_in_memory;

    async fn setup() -> (SqlitePool, i64, i64) {
        let db = connect_in_memory().await.unwrap();
        let a = User::create(&db, "a@x.com", "h").await.unwrap();
        let b = User::create(&db, "b@x.com", "h").await.unwrap();
        (db, a.id, b.id)
    }

    #[tokio::test]
    async fn create_returns_generated_fields() {
        let (db, a, _) = setup().await;
        let e = create(&db, a, "food", 12.5, Some("lunch")).await.unwrap();
        assert!(e.id > 0);
        assert_eq!(e.category, "food");
        assert_eq!(e.amount, 12.5);
        assert_eq!(e.comments.as_deref(), Some("lunch"));
        assert_eq!(e.owner_id, a);
        assert_eq!(e.created_at, e.updated_at);
    }

    #[tokio::test]
    async fn zero_and_negative_amounts_are_accepted() {
        let (db, a, _) = setup().await;
        assert_eq!(create(&db, a, "refund", -5.0, None).await.unwrap().amount, -5.0);
        assert_eq!(create(&db, a, "free", 0.0, None).await.unwrap().amount, 0.0);
    }

    #[tokio::test]
    async fn list_is_newest_first_whatever_the_insert_order() {
        let (db, a, _) = setup().await;
        for (cat, ts) in [
            ("b", "2024-01-02T00:00:00.000Z"),
            ("c", "2024-01-03T00:00:00.000Z"),
            ("a", "2024-01-01T00:00:00.000Z"),
        ] {
            sqlx::query(
                "INSERT INTO expenses (category, amount, owner_id, created_at, updated_at) VALUES (?, 1.0, ?, ?, ?)",
            )
            .bind(cat)
            .bind(a)
            .bind(ts)
            .bind(ts)
            .execute(&db)
            .await
            .unwrap();
        }

        let cats: Vec<_> = list_by_owner(&db, a)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(cats, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn same_instant_falls_back_to_insertion_order() {
        let (db, a, _) = setup().await;
        let first = create(&db, a, "x", 1.0, None).await.unwrap();
        let second = create(&db, a, "y", 1.0, None).await.unwrap();
        let listed = list_by_owner(&db, a).await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn owners_never_see_or_delete_each_others_rows() {
        let (db, a, b) = setup().await;
        let mine = create(&db, a, "food", 3.0, None).await.unwrap();

        assert!(list_by_owner(&db, b).await.unwrap().is_empty());
        assert!(!delete_owned(&db, b, mine.id).await.unwrap());
        assert_eq!(list_by_owner(&db, a).await.unwrap().len(), 1);

        assert!(delete_owned(&db, a, mine.id).await.unwrap());
        assert!(!delete_owned(&db, a, mine.id).await.unwrap());
    }

    #[tokio::test]
    async fn totals_match_listed_amounts() {
        let (db, a, b) = setup().await;
        let rows = [
            ("food", 12.5),
            ("fuel", 40.0),
            ("food", 7.5),
            ("rent", 800.0),
            ("fuel", 2.25),
        ];
        for (cat, amt) in rows {
            create(&db, a, cat, amt, None).await.unwrap();
        }
        create(&db, b, "food", 1000.0, None).await.unwrap();

        let mut expected: HashMap<String, f64> = HashMap::new();
        for e in list_by_owner(&db, a).await.unwrap() {
            *expected.entry(e.category).or_default() += e.amount;
        }

        let totals = totals_by_category(&db, a).await.unwrap();
        assert_eq!(totals.len(), expected.len());
        for t in totals {
            assert_eq!(Some(&t.total), expected.get(&t.category));
        }
    }

    #[tokio::test]
    async fn emptied_category_disappears_from_totals() {
        let (db, a, _) = setup().await;
        create(&db, a, "food", 1.0, None).await.unwrap();
        let fuel = create(&db, a, "fuel", 40.0, None).await.unwrap();
        delete_owned(&db, a, fuel.id).await.unwrap();

        let cats: Vec<_> = totals_by_category(&db, a)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(cats, vec!["food"]);
    }

    #[tokio::test]
    async fn updating_a_row_refreshes_updated_at_only() {
        let (db, a, _) = setup().await;
        let before = create(&db, a, "food", 1.0, None).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        sqlx::query("UPDATE expenses SET comments = 'edited' WHERE id = ?")
            .bind(before.id)
            .execute(&db)
            .await
            .unwrap();

        let after = list_by_owner(&db, a).await.unwrap().remove(0);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }
}
