//! Password value object - one-way hashed credentials.
//!
//! Plain text never leaves this module: callers hand in the raw password
//! and get back an argon2 PHC string, or ask whether a raw password
//! matches a stored one.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;

use crate::config::UNUSABLE_PASSWORD_PREFIX;
use crate::errors::{AppError, AppResult};

/// Stored credential of an identity.
///
/// Either an argon2 hash or an *unusable* marker for accounts created
/// without a password; the marker never verifies.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password with a fresh random salt.
    ///
    /// Length rules are enforced at the API boundary, not here, so that
    /// administrative tools can create accounts with any password.
    ///
    /// # Errors
    /// Returns an internal error if hashing fails.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Credential that can never be used to log in.
    pub fn unusable() -> Self {
        Self {
            hash: format!("{}{}", UNUSABLE_PASSWORD_PREFIX, Uuid::new_v4().simple()),
        }
    }

    /// Hash the password if one is given, otherwise mark the credential unusable.
    pub fn from_optional(plain_text: Option<&str>) -> AppResult<Self> {
        match plain_text {
            Some(plain) => Self::new(plain),
            None => Ok(Self::unusable()),
        }
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Whether this credential can ever verify.
    pub fn is_usable(&self) -> bool {
        !self.hash.starts_with(UNUSABLE_PASSWORD_PREFIX)
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        if !self.is_usable() {
            return false;
        }
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
        assert_ne!(password.as_str(), plain);
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let password = Password::new(plain).unwrap();
        let hash = password.as_str().to_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_short_password_still_hashed() {
        let password = Password::new("test123").unwrap();
        assert!(password.verify("test123"));
    }

    #[test]
    fn test_unusable_password_never_verifies() {
        let password = Password::from_optional(None).unwrap();

        assert!(!password.is_usable());
        assert!(!password.verify(""));
        assert!(!password.verify(password.as_str()));
    }

    #[test]
    fn test_unusable_passwords_are_distinct() {
        assert_ne!(Password::unusable(), Password::unusable());
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = Password::new("secret-value").unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("argon2"));
    }
}
