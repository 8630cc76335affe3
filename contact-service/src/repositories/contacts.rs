use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::PgPool;

use super::{like_pattern, storage, ContactRepository};
use crate::models::{Contact, NewContact, Page, PageRequest};

const CONTACT_COLUMNS: &str =
    "contact_id, user_id, first_name, last_name, email, phone, created_at, updated_at";

const SEARCH_FILTER: &str = "($2::text IS NULL \
     OR first_name ILIKE $2 OR last_name ILIKE $2 OR email ILIKE $2 OR phone ILIKE $2)";

#[derive(Clone)]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn list(
        &self,
        user_id: i64,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Contact>, AppError> {
        let pattern = search.map(like_pattern);

        let count_sql = format!("SELECT COUNT(*) FROM contacts WHERE user_id = $1 AND {SEARCH_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(user_id)
            .bind(pattern.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;

        let sql = format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE user_id = $1 AND {SEARCH_FILTER} \
             ORDER BY contact_id LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, Contact>(&sql)
            .bind(user_id)
            .bind(pattern.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

        Ok(Page::new(rows, page, total))
    }

    async fn insert(&self, contact: NewContact) -> Result<Contact, AppError> {
        let sql = format!(
            "INSERT INTO contacts (user_id, first_name, last_name, email, phone) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&sql)
            .bind(contact.user_id)
            .bind(&contact.first_name)
            .bind(&contact.last_name)
            .bind(&contact.email)
            .bind(&contact.phone)
            .fetch_one(&self.pool)
            .await
            .map_err(storage)
    }

    async fn find(&self, id: i64, user_id: i64) -> Result<Option<Contact>, AppError> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)
    }

    async fn update(&self, contact: &Contact) -> Result<Option<Contact>, AppError> {
        let sql = format!(
            "UPDATE contacts SET first_name = $1, last_name = $2, email = $3, phone = $4, \
             updated_at = NOW() WHERE contact_id = $5 AND user_id = $6 RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&sql)
            .bind(&contact.first_name)
            .bind(&contact.last_name)
            .bind(&contact.email)
            .bind(&contact.phone)
            .bind(contact.id)
            .bind(contact.user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contacts WHERE contact_id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected() > 0)
    }
}
