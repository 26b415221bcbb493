use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way salted password hashing.
///
/// Wraps Argon2id with the crate's default (memory-hard) parameters. Hashes
/// are PHC strings carrying algorithm, parameters and salt, so verification
/// needs nothing beyond the stored value.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a plaintext password.
    ///
    /// A fresh random salt is drawn per call, so hashing the same password
    /// twice yields two different PHC strings.
    ///
    /// # Errors
    /// * `HashingFailed` - the underlying KDF reported a fault
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored PHC hash.
    ///
    /// Returns `Ok(false)` for a wrong password; the comparison inside the
    /// argon2 crate is constant-time. An unparseable hash is an internal
    /// fault (the value we stored is corrupt), reported as an error rather
    /// than a plain mismatch.
    ///
    /// # Errors
    /// * `VerificationFailed` - stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_unique_salt_per_call() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same_input").unwrap();
        let second = hasher.hash("same_input").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same_input", &first).unwrap());
        assert!(hasher.verify("same_input", &second).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "invalid_hash");
        assert!(result.is_err());
    }

    #[test]
    fn test_hash_is_phc_string() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password").unwrap();
        assert!(hash.starts_with("$argon2"));
    }
}
