use std::sync::Arc;

use service_core::error::AppError;

use super::{normalize_email, required, ServiceError};
use crate::models::{AuthenticatedUser, NewUser, User, UserProfile};
use crate::repositories::CredentialStore;
use crate::utils::{generate_token, hash_password, verify_password, Password};

/// A logged-in user together with their current bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
}

/// Registration, login and token resolution.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self { credentials }
    }

    pub async fn register(
        &self,
        name: String,
        email: &str,
        password: &Password,
    ) -> Result<UserProfile, ServiceError> {
        let user = create_user(self.credentials.as_ref(), name, email, password).await?;
        metrics::counter!("contact_registrations_total").increment(1);
        tracing::info!(user_id = user.id, "User registered");
        Ok(user.profile())
    }

    /// Verify credentials and issue a fresh token, replacing any previous one.
    pub async fn login(&self, email: &str, password: &Password) -> Result<Session, ServiceError> {
        let email = normalize_email(email);

        let Some(user) = self.credentials.find_by_email(&email).await? else {
            metrics::counter!("contact_logins_total", "outcome" => "unknown_email").increment(1);
            tracing::debug!("Login attempt for unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if verify_password(password, &user.password_hash()).is_err() {
            metrics::counter!("contact_logins_total", "outcome" => "bad_password").increment(1);
            tracing::warn!(user_id = user.id, "Login failed: password mismatch");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = generate_token();
        if !self.credentials.store_token(user.id, &token).await? {
            return Err(ServiceError::InvalidCredentials);
        }

        metrics::counter!("contact_logins_total", "outcome" => "success").increment(1);
        tracing::info!(user_id = user.id, "User logged in");

        Ok(Session {
            user: user.profile(),
            token,
        })
    }

    /// Resolve a bearer token to the user it was issued to.
    pub async fn resolve_by_token(&self, token: &str) -> Result<AuthenticatedUser, ServiceError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ServiceError::Unauthorized);
        }

        self.credentials
            .find_by_token(token)
            .await?
            .map(|user| AuthenticatedUser { user_id: user.id })
            .ok_or(ServiceError::Unauthorized)
    }

    /// Current session for `GET /me`.
    pub async fn resolve_by_id(&self, user_id: i64) -> Result<Session, ServiceError> {
        let user = self
            .credentials
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        Ok(Session {
            user: user.profile(),
            token: user.token.unwrap_or_default(),
        })
    }
}

/// Shared by registration and the user directory: the only place a raw
/// password is turned into a stored hash.
pub(super) async fn create_user(
    credentials: &dyn CredentialStore,
    name: String,
    email: &str,
    password: &Password,
) -> Result<User, ServiceError> {
    let name = required("name", name)?;
    let email = normalize_email(email);

    if credentials.find_by_email(&email).await?.is_some() {
        return Err(ServiceError::UserAlreadyExists);
    }

    let password_hash = hash_password(password).map_err(AppError::InternalError)?;

    let user = credentials
        .insert(NewUser {
            name,
            email,
            password_hash,
        })
        .await?;
    Ok(user)
}
