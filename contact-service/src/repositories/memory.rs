//! In-memory implementation of every repository trait, for tests and local
//! development without PostgreSQL. Mirrors the schema's behaviour: unique
//! emails and tokens, ordering by id, and cascading deletes.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use service_core::error::AppError;

use super::{AddressRepository, ContactRepository, CredentialStore, StorageHealth, UserRepository};
use crate::models::{
    Address, Contact, NewAddress, NewContact, NewUser, Page, PageRequest, User,
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    contacts: BTreeMap<i64, Contact>,
    addresses: BTreeMap<i64, Address>,
    next_user_id: i64,
    next_contact_id: i64,
    next_address_id: i64,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn owns_contact(&self, contact_id: i64, user_id: i64) -> bool {
        self.contacts
            .get(&contact_id)
            .is_some_and(|c| c.user_id == user_id)
    }

    fn owns_address(&self, address_id: i64, user_id: i64) -> bool {
        self.addresses
            .get(&address_id)
            .is_some_and(|a| self.owns_contact(a.contact_id, user_id))
    }

    fn remove_contact(&mut self, contact_id: i64) {
        self.contacts.remove(&contact_id);
        self.addresses.retain(|_, a| a.contact_id != contact_id);
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to acquire write lock: {}", e)))
    }
}

fn matches(search: Option<&str>, fields: &[Option<&str>]) -> bool {
    let Some(needle) = search else {
        return true;
    };
    let needle = needle.to_lowercase();
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn paginate<T>(rows: Vec<T>, page: PageRequest) -> Page<T> {
    let total = rows.len() as i64;
    let data = rows
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    Page::new(data, page, total)
}

#[async_trait]
impl StorageHealth for InMemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}

#[async_trait]
impl CredentialStore for InMemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.write()?;
        if tables.email_taken(&user.email, None) {
            return Err(AppError::conflict("user already exists"));
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let row = User {
            id: tables.next_user_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash.into_string(),
            token: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.read()?;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .users
            .values()
            .find(|u| u.token.as_deref() == Some(token))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.read()?;
        Ok(tables.users.get(&id).cloned())
    }

    async fn store_token(&self, id: i64, token: &str) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        match tables.users.get_mut(&id) {
            Some(user) => {
                user.token = Some(token.to_string());
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self, page: PageRequest, search: Option<&str>) -> Result<Page<User>, AppError> {
        let tables = self.read()?;
        let rows = tables
            .users
            .values()
            .filter(|u| matches(search, &[Some(u.name.as_str()), Some(u.email.as_str())]))
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn update(&self, user: &User) -> Result<Option<User>, AppError> {
        let mut tables = self.write()?;
        if !tables.users.contains_key(&user.id) {
            return Ok(None);
        }
        if tables.email_taken(&user.email, Some(user.id)) {
            return Err(AppError::conflict("email already in use"));
        }

        let Some(row) = tables.users.get_mut(&user.id) else {
            return Ok(None);
        };
        row.name = user.name.clone();
        row.email = user.email.clone();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }

        let owned: Vec<i64> = tables
            .contacts
            .values()
            .filter(|c| c.user_id == id)
            .map(|c| c.id)
            .collect();
        for contact_id in owned {
            tables.remove_contact(contact_id);
        }
        Ok(true)
    }
}

#[async_trait]
impl ContactRepository for InMemoryStore {
    async fn list(
        &self,
        user_id: i64,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Contact>, AppError> {
        let tables = self.read()?;
        let rows = tables
            .contacts
            .values()
            .filter(|c| c.user_id == user_id)
            .filter(|c| {
                matches(
                    search,
                    &[
                        Some(c.first_name.as_str()),
                        c.last_name.as_deref(),
                        Some(c.email.as_str()),
                        c.phone.as_deref(),
                    ],
                )
            })
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn insert(&self, contact: NewContact) -> Result<Contact, AppError> {
        let mut tables = self.write()?;
        if !tables.users.contains_key(&contact.user_id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "contacts.user_id references a missing user"
            )));
        }

        tables.next_contact_id += 1;
        let now = Utc::now();
        let row = Contact {
            id: tables.next_contact_id,
            user_id: contact.user_id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            created_at: now,
            updated_at: now,
        };
        tables.contacts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find(&self, id: i64, user_id: i64) -> Result<Option<Contact>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .contacts
            .get(&id)
            .filter(|c| c.user_id == user_id)
            .cloned())
    }

    async fn update(&self, contact: &Contact) -> Result<Option<Contact>, AppError> {
        let mut tables = self.write()?;
        let Some(row) = tables
            .contacts
            .get_mut(&contact.id)
            .filter(|c| c.user_id == contact.user_id)
        else {
            return Ok(None);
        };

        row.first_name = contact.first_name.clone();
        row.last_name = contact.last_name.clone();
        row.email = contact.email.clone();
        row.phone = contact.phone.clone();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if !tables.owns_contact(id, user_id) {
            return Ok(false);
        }
        tables.remove_contact(id);
        Ok(true)
    }
}

#[async_trait]
impl AddressRepository for InMemoryStore {
    async fn list(
        &self,
        user_id: i64,
        contact_id: i64,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Address>, AppError> {
        let tables = self.read()?;
        if !tables.owns_contact(contact_id, user_id) {
            return Ok(paginate(Vec::new(), page));
        }

        let rows = tables
            .addresses
            .values()
            .filter(|a| a.contact_id == contact_id)
            .filter(|a| {
                matches(
                    search,
                    &[
                        a.street.as_deref(),
                        a.city.as_deref(),
                        a.state.as_deref(),
                        a.postal_code.as_deref(),
                        Some(a.country.as_str()),
                    ],
                )
            })
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn insert(&self, address: NewAddress) -> Result<Address, AppError> {
        let mut tables = self.write()?;
        if !tables.contacts.contains_key(&address.contact_id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "addresses.contact_id references a missing contact"
            )));
        }

        tables.next_address_id += 1;
        let now = Utc::now();
        let row = Address {
            id: tables.next_address_id,
            contact_id: address.contact_id,
            street: address.street,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
            created_at: now,
            updated_at: now,
        };
        tables.addresses.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find(&self, id: i64, user_id: i64) -> Result<Option<Address>, AppError> {
        let tables = self.read()?;
        if !tables.owns_address(id, user_id) {
            return Ok(None);
        }
        Ok(tables.addresses.get(&id).cloned())
    }

    async fn update(&self, user_id: i64, address: &Address) -> Result<Option<Address>, AppError> {
        let mut tables = self.write()?;
        if !tables.owns_address(address.id, user_id) {
            return Ok(None);
        }
        let Some(row) = tables.addresses.get_mut(&address.id) else {
            return Ok(None);
        };

        row.street = address.street.clone();
        row.city = address.city.clone();
        row.state = address.state.clone();
        row.postal_code = address.postal_code.clone();
        row.country = address.country.clone();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if !tables.owns_address(id, user_id) {
            return Ok(false);
        }
        Ok(tables.addresses.remove(&id).is_some())
    }
}
