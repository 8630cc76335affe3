use std::sync::Arc;

use super::{normalize_email, optional, patch_required, patch_value, required, ServiceError};
use crate::models::{Contact, ContactPatch, NewContact, Page, PageRequest};
use crate::repositories::ContactRepository;

/// Contact book. Every operation is scoped to the calling user.
#[derive(Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    pub async fn list(
        &self,
        user_id: i64,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Contact>, ServiceError> {
        Ok(self.contacts.list(user_id, page, search).await?)
    }

    /// Store a new contact. `contact.user_id` must be the caller's id.
    pub async fn create(&self, contact: NewContact) -> Result<Contact, ServiceError> {
        let contact = NewContact {
            user_id: contact.user_id,
            first_name: required("first_name", contact.first_name)?,
            last_name: optional(contact.last_name),
            email: normalize_email(&required("email", contact.email)?),
            phone: optional(contact.phone),
        };

        let created = self.contacts.insert(contact).await?;
        tracing::info!(user_id = created.user_id, contact_id = created.id, "Contact created");
        Ok(created)
    }

    pub async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Contact, ServiceError> {
        self.contacts
            .find(id, user_id)
            .await?
            .ok_or(ServiceError::ContactNotFound)
    }

    /// Merge-patch: omitted fields keep their values, blank optional fields clear.
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        patch: ContactPatch,
    ) -> Result<Contact, ServiceError> {
        let mut contact = self.find_by_id(id, user_id).await?;

        let patch = ContactPatch {
            first_name: patch_required("first_name", patch.first_name)?,
            last_name: patch_value(patch.last_name),
            email: patch_required("email", patch.email)?.as_deref().map(normalize_email),
            phone: patch_value(patch.phone),
        };
        contact.apply(patch);

        let updated = self
            .contacts
            .update(&contact)
            .await?
            .ok_or(ServiceError::ContactNotFound)?;

        tracing::info!(user_id, contact_id = id, "Contact updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64, user_id: i64) -> Result<(), ServiceError> {
        self.find_by_id(id, user_id).await?;

        if !self.contacts.delete(id, user_id).await? {
            return Err(ServiceError::ContactNotFound);
        }
        tracing::info!(user_id, contact_id = id, "Contact deleted");
        Ok(())
    }
}
