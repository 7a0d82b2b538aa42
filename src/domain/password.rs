//! Password value object.
//!
//! Argon2 hashing and verification for account credentials.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Hashed password. Never holds the plain text.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a new plain-text password.
    ///
    /// # Errors
    /// Returns a validation error if the password is shorter than
    /// `MIN_PASSWORD_LENGTH` characters.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// A real Argon2 hash of a throwaway secret.
    ///
    /// Verifying against it costs the same as verifying a stored hash, so a
    /// login for an unknown email takes as long as one for a known email.
    pub fn dummy() -> Self {
        static DUMMY: OnceLock<String> = OnceLock::new();
        let hash = DUMMY.get_or_init(|| {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(b"timing-equalizer-not-a-password", &salt)
                .map(|h| h.to_string())
                .unwrap_or_default()
        });
        Self { hash: hash.clone() }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Check a plain-text candidate. Malformed stored hashes never verify.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                false
            }
        }
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original() {
        let password = Password::new("correct horse battery").unwrap();

        assert!(password.verify("correct horse battery"));
        assert!(!password.verify("correct horse staple"));
    }

    #[test]
    fn stored_hash_round_trips() {
        let hash = Password::new("SellerPass123").unwrap().into_string();
        assert!(Password::from_hash(hash).verify("SellerPass123"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let first = Password::new("SamePassword123").unwrap();
        let second = Password::new("SamePassword123").unwrap();
        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(matches!(Password::new("short"), Err(AppError::Validation(_))));
        assert!(Password::new("12345678").is_ok());
    }

    #[test]
    fn dummy_hash_rejects_everything() {
        let dummy = Password::dummy();
        assert!(!dummy.as_str().is_empty());
        assert!(!dummy.verify(""));
        assert!(!dummy.verify("password123"));
    }

    #[test]
    fn malformed_hash_does_not_verify() {
        assert!(!Password::from_hash("not-a-phc-string".to_string()).verify("anything"));
    }
}
