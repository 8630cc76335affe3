use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::PgPool;

use super::{like_pattern, storage, unique_violation, CredentialStore, StorageHealth, UserRepository};
use crate::models::{NewUser, Page, PageRequest, User};

const USER_COLUMNS: &str = "user_id, name, email, password_hash, token, created_at, updated_at";

/// PostgreSQL-backed user table. Serves both the credential lookups and the
/// user directory.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)
    }
}

#[async_trait]
impl StorageHealth for PgUserStore {
    async fn ping(&self) -> Result<(), AppError> {
        crate::db::health_check(&self.pool).await
    }
}

#[async_trait]
impl CredentialStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.password_hash.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unique_violation(e, "user already exists"))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_one("email", email).await
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, AppError> {
        self.find_one("token", token).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)
    }

    async fn store_token(&self, id: i64, token: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE users SET token = $1, updated_at = NOW() WHERE user_id = $2")
            .bind(token)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for PgUserStore {
    async fn list(&self, page: PageRequest, search: Option<&str>) -> Result<Page<User>, AppError> {
        let pattern = search.map(like_pattern);
        let filter = "($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users WHERE {filter}"))
            .bind(pattern.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {filter} ORDER BY user_id LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, User>(&sql)
            .bind(pattern.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

        Ok(Page::new(rows, page, total))
    }

    async fn update(&self, user: &User) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE users SET name = $1, email = $2, updated_at = NOW() WHERE user_id = $3 RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unique_violation(e, "email already in use"))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected() > 0)
    }
}
