use std::sync::Arc;

use super::{auth::create_user, normalize_email, patch_required, ServiceError};
use crate::models::{Page, PageRequest, UserPatch, UserProfile};
use crate::repositories::{CredentialStore, UserRepository};
use crate::utils::Password;

/// Owner-less directory over user profiles.
#[derive(Clone)]
pub struct UserService {
    credentials: Arc<dyn CredentialStore>,
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(credentials: Arc<dyn CredentialStore>, users: Arc<dyn UserRepository>) -> Self {
        Self { credentials, users }
    }

    pub async fn list(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<UserProfile>, ServiceError> {
        let users = self.users.list(page, search).await?;
        Ok(users.map(UserProfile::from))
    }

    /// Create a user from the directory. The password is hashed here, exactly
    /// as at registration.
    pub async fn create(
        &self,
        name: String,
        email: &str,
        password: &Password,
    ) -> Result<UserProfile, ServiceError> {
        let user = create_user(self.credentials.as_ref(), name, email, password).await?;
        tracing::info!(user_id = user.id, "User created from directory");
        Ok(user.profile())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<UserProfile, ServiceError> {
        self.credentials
            .find_by_id(id)
            .await?
            .map(UserProfile::from)
            .ok_or(ServiceError::UserNotFound)
    }

    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<UserProfile, ServiceError> {
        let mut user = self
            .credentials
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        let patch = UserPatch {
            name: patch_required("name", patch.name)?,
            email: patch_required("email", patch.email)?
                .as_deref()
                .map(normalize_email),
        };

        if let Some(email) = patch.email.as_deref() {
            if email != user.email {
                if let Some(holder) = self.credentials.find_by_email(email).await? {
                    if holder.id != user.id {
                        return Err(ServiceError::EmailInUse);
                    }
                }
            }
        }

        user.apply(patch);
        let updated = self
            .users
            .update(&user)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        tracing::info!(user_id = id, "User updated");
        Ok(updated.profile())
    }

    /// Hard delete; the user's contacts and addresses go with it.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.users.delete(id).await? {
            return Err(ServiceError::UserNotFound);
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
