use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::PgPool;

use super::{like_pattern, storage, AddressRepository};
use crate::models::{Address, NewAddress, Page, PageRequest};

const ADDRESS_COLUMNS: &str = "a.address_id, a.contact_id, a.street, a.city, a.state, \
     a.postal_code, a.country, a.created_at, a.updated_at";

const RETURNING_COLUMNS: &str = "address_id, contact_id, street, city, state, postal_code, \
     country, created_at, updated_at";

const SEARCH_FILTER: &str = "($3::text IS NULL OR a.street ILIKE $3 OR a.city ILIKE $3 \
     OR a.state ILIKE $3 OR a.postal_code ILIKE $3 OR a.country ILIKE $3)";

/// Every statement joins `contacts` so the caller's ownership is re-checked
/// on the address itself, not only on the contact id supplied in a request.
#[derive(Clone)]
pub struct PgAddressRepository {
    pool: PgPool,
}

impl PgAddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for PgAddressRepository {
    async fn list(
        &self,
        user_id: i64,
        contact_id: i64,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Address>, AppError> {
        let pattern = search.map(like_pattern);
        let scope = "FROM addresses a JOIN contacts c ON c.contact_id = a.contact_id \
                     WHERE c.user_id = $1 AND a.contact_id = $2";

        let count_sql = format!("SELECT COUNT(*) {scope} AND {SEARCH_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(user_id)
            .bind(contact_id)
            .bind(pattern.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;

        let sql = format!(
            "SELECT {ADDRESS_COLUMNS} {scope} AND {SEARCH_FILTER} \
             ORDER BY a.address_id LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, Address>(&sql)
            .bind(user_id)
            .bind(contact_id)
            .bind(pattern.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

        Ok(Page::new(rows, page, total))
    }

    async fn insert(&self, address: NewAddress) -> Result<Address, AppError> {
        let sql = format!(
            "INSERT INTO addresses (contact_id, street, city, state, postal_code, country) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {RETURNING_COLUMNS}"
        );
        sqlx::query_as::<_, Address>(&sql)
            .bind(address.contact_id)
            .bind(&address.street)
            .bind(&address.city)
            .bind(&address.state)
            .bind(&address.postal_code)
            .bind(&address.country)
            .fetch_one(&self.pool)
            .await
            .map_err(storage)
    }

    async fn find(&self, id: i64, user_id: i64) -> Result<Option<Address>, AppError> {
        let sql = format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses a \
             JOIN contacts c ON c.contact_id = a.contact_id \
             WHERE a.address_id = $1 AND c.user_id = $2"
        );
        sqlx::query_as::<_, Address>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)
    }

    async fn update(&self, user_id: i64, address: &Address) -> Result<Option<Address>, AppError> {
        let sql = format!(
            "UPDATE addresses a SET street = $1, city = $2, state = $3, postal_code = $4, \
             country = $5, updated_at = NOW() \
             FROM contacts c \
             WHERE a.address_id = $6 AND c.contact_id = a.contact_id AND c.user_id = $7 \
             RETURNING {ADDRESS_COLUMNS}"
        );
        sqlx::query_as::<_, Address>(&sql)
            .bind(&address.street)
            .bind(&address.city)
            .bind(&address.state)
            .bind(&address.postal_code)
            .bind(&address.country)
            .bind(address.id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM addresses a USING contacts c \
             WHERE a.address_id = $1 AND c.contact_id = a.contact_id AND c.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(result.rows_affected() > 0)
    }
}
