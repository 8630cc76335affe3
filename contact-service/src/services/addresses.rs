use std::sync::Arc;

use super::{optional, patch_required, patch_value, required, ServiceError};
use crate::models::{Address, AddressPatch, NewAddress, Page, PageRequest};
use crate::repositories::{AddressRepository, ContactRepository};

/// Address book. Creation and listing resolve the parent contact for the
/// caller first; the id-keyed operations re-check ownership in storage.
#[derive(Clone)]
pub struct AddressService {
    contacts: Arc<dyn ContactRepository>,
    addresses: Arc<dyn AddressRepository>,
}

impl AddressService {
    pub fn new(contacts: Arc<dyn ContactRepository>, addresses: Arc<dyn AddressRepository>) -> Self {
        Self {
            contacts,
            addresses,
        }
    }

    async fn ensure_contact(&self, contact_id: i64, user_id: i64) -> Result<(), ServiceError> {
        match self.contacts.find(contact_id, user_id).await? {
            Some(_) => Ok(()),
            None => {
                tracing::debug!(user_id, contact_id, "Parent contact not found for caller");
                Err(ServiceError::ContactNotFound)
            }
        }
    }

    pub async fn list(
        &self,
        user_id: i64,
        contact_id: i64,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Address>, ServiceError> {
        self.ensure_contact(contact_id, user_id).await?;
        Ok(self.addresses.list(user_id, contact_id, page, search).await?)
    }

    pub async fn create(&self, user_id: i64, address: NewAddress) -> Result<Address, ServiceError> {
        self.ensure_contact(address.contact_id, user_id).await?;

        let address = NewAddress {
            contact_id: address.contact_id,
            street: optional(address.street),
            city: optional(address.city),
            state: optional(address.state),
            postal_code: optional(address.postal_code),
            country: required("country", address.country)?,
        };

        let created = self.addresses.insert(address).await?;
        tracing::info!(
            user_id,
            contact_id = created.contact_id,
            address_id = created.id,
            "Address created"
        );
        Ok(created)
    }

    pub async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Address, ServiceError> {
        self.addresses
            .find(id, user_id)
            .await?
            .ok_or(ServiceError::AddressNotFound)
    }

    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        patch: AddressPatch,
    ) -> Result<Address, ServiceError> {
        let mut address = self.find_by_id(id, user_id).await?;

        let patch = AddressPatch {
            street: patch_value(patch.street),
            city: patch_value(patch.city),
            state: patch_value(patch.state),
            postal_code: patch_value(patch.postal_code),
            country: patch_required("country", patch.country)?,
        };
        address.apply(patch);

        let updated = self
            .addresses
            .update(user_id, &address)
            .await?
            .ok_or(ServiceError::AddressNotFound)?;

        tracing::info!(user_id, address_id = id, "Address updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64, user_id: i64) -> Result<(), ServiceError> {
        self.find_by_id(id, user_id).await?;

        if !self.addresses.delete(id, user_id).await? {
            return Err(ServiceError::AddressNotFound);
        }
        tracing::info!(user_id, address_id = id, "Address deleted");
        Ok(())
    }
}
