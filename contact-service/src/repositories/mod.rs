//! Storage seams for the three verticals.
//!
//! Every trait method that touches contacts or addresses takes the caller's
//! `user_id` and filters on it, so a row owned by someone else is
//! indistinguishable from a missing one.

pub mod addresses;
pub mod contacts;
pub mod memory;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::PgPool;

use crate::models::{
    Address, Contact, NewAddress, NewContact, NewUser, Page, PageRequest, User,
};

pub use addresses::PgAddressRepository;
pub use contacts::PgContactRepository;
pub use memory::InMemoryStore;
pub use users::PgUserStore;

/// Lookups the auth flow needs: by email for login, by token for the gate,
/// by id for `/me`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user. A taken email yields `AppError::Conflict`.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    /// Replace the user's session token. Returns false if the user is gone.
    async fn store_token(&self, id: i64, token: &str) -> Result<bool, AppError>;
}

/// Owner-less directory operations over user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self, page: PageRequest, search: Option<&str>) -> Result<Page<User>, AppError>;
    /// Persist name and email. Returns `None` if the row no longer exists.
    async fn update(&self, user: &User) -> Result<Option<User>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn list(
        &self,
        user_id: i64,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Contact>, AppError>;
    async fn insert(&self, contact: NewContact) -> Result<Contact, AppError>;
    async fn find(&self, id: i64, user_id: i64) -> Result<Option<Contact>, AppError>;
    /// Persist every mutable column of `contact`, scoped by its owner.
    async fn update(&self, contact: &Contact) -> Result<Option<Contact>, AppError>;
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError>;
}

/// Address storage. Ownership is checked by joining through the parent
/// contact's `user_id`.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn list(
        &self,
        user_id: i64,
        contact_id: i64,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Address>, AppError>;
    async fn insert(&self, address: NewAddress) -> Result<Address, AppError>;
    async fn find(&self, id: i64, user_id: i64) -> Result<Option<Address>, AppError>;
    async fn update(&self, user_id: i64, address: &Address) -> Result<Option<Address>, AppError>;
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError>;
}

/// Liveness probe for whatever backs the repositories.
#[async_trait]
pub trait StorageHealth: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}

/// The full set of repositories a service graph is built from.
#[derive(Clone)]
pub struct Repositories {
    pub health: Arc<dyn StorageHealth>,
    pub credentials: Arc<dyn CredentialStore>,
    pub users: Arc<dyn UserRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub addresses: Arc<dyn AddressRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        let users = Arc::new(PgUserStore::new(pool.clone()));
        Self {
            health: users.clone(),
            credentials: users.clone(),
            users,
            contacts: Arc::new(PgContactRepository::new(pool.clone())),
            addresses: Arc::new(PgAddressRepository::new(pool)),
        }
    }

    pub fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            health: store.clone(),
            credentials: store.clone(),
            users: store.clone(),
            contacts: store.clone(),
            addresses: store,
        }
    }
}

/// Wrap a search needle for `ILIKE`, escaping the pattern metacharacters so
/// user input always matches literally.
pub(crate) fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for ch in search.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Map a unique-index violation to `Conflict`, anything else to a storage error.
pub(crate) fn unique_violation(err: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::conflict(message);
        }
    }
    AppError::DatabaseError(anyhow::anyhow!(err))
}

pub(crate) fn storage(err: sqlx::Error) -> AppError {
    AppError::DatabaseError(anyhow::anyhow!(err))
}
