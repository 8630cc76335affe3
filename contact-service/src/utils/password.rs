use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::fmt;

/// Raw password as received from a client. Never logged, never stored.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Argon2 PHC string. The only password representation repositories accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHashString(String);

impl PasswordHashString {
    /// Wrap a hash loaded from storage.
    pub fn from_stored(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &Password) -> Result<PasswordHashString, anyhow::Error> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(PasswordHashString(password_hash))
}

/// Verify a password against a stored hash. The comparison is constant-time.
pub fn verify_password(
    password: &Password,
    password_hash: &PasswordHashString,
) -> Result<(), anyhow::Error> {
    let parsed_hash = PasswordHash::new(password_hash.as_str())
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {}", e))?;

    Argon2::default()
        .verify_password(password.as_str().as_bytes(), &parsed_hash)
        .map_err(|_| anyhow::anyhow!("Password verification failed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_argon2_and_never_the_raw_password() {
        let password = Password::new("hunter22secret");
        let hash = hash_password(&password).expect("Failed to hash password");

        assert!(hash.as_str().starts_with("$argon2"));
        assert_ne!(hash.as_str(), password.as_str());
    }

    #[test]
    fn verify_accepts_the_right_password_only() {
        let password = Password::new("hunter22secret");
        let hash = hash_password(&password).expect("Failed to hash password");

        assert!(verify_password(&password, &hash).is_ok());
        assert!(verify_password(&Password::new("wrong-password"), &hash).is_err());
    }

    #[test]
    fn salts_differ_between_hashes() {
        let password = Password::new("hunter22secret");
        let first = hash_password(&password).expect("Failed to hash password");
        let second = hash_password(&password).expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(verify_password(&password, &first).is_ok());
        assert!(verify_password(&password, &second).is_ok());
    }

    #[test]
    fn garbage_hash_is_rejected() {
        let stored = PasswordHashString::from_stored("not-a-phc-string".to_string());
        assert!(verify_password(&Password::new("anything"), &stored).is_err());
    }

    #[test]
    fn debug_output_is_redacted() {
        let password = Password::new("hunter22secret");
        assert_eq!(format!("{:?}", password), "Password(***)");
    }
}
