use crate::auth::repo_types::User;
use sqlx::SqlitePool;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Find a user by primary key.
    pub async fn find_by_id(db: &SqlitePool, id: i64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with hashed password.
    pub async fn create(db: &SqlitePool, email: &str, hashed_password: &str) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES (?, ?)
            RETURNING id, email, hashed_password
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    #[tokio::test]
    async fn create_then_find_by_email_and_id() {
        let db = connect_in_memory().await.unwrap();
        let created = User::create(&db, "a@x.com", "hash").await.unwrap();
        assert!(created.id > 0);

        let by_email = User::find_by_email(&db, "a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.hashed_password, "hash");

        let by_id = User::find_by_id(&db, created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@x.com");
    }

    #[tokio::test]
    async fn missing_user_is_none() {
        let db = connect_in_memory().await.unwrap();
        assert!(User::find_by_email(&db, "nobody@x.com").await.unwrap().is_none());
        assert!(User::find_by_id(&db, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_violates_unique_constraint() {
        let db = connect_in_memory().await.unwrap();
        User::create(&db, "dup@x.com", "h1").await.unwrap();
        let err = User::create(&db, "dup@x.com", "h2").await.unwrap_err();
        match err {
            sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn hash_is_not_serialized() {
        let user = User {
            id: 1,
            email: "a@x.com".into(),
            hashed_password: "secret-hash".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("hashed_password"));
    }
}
