use thiserror::Error;

/// Error type for password hashing operations.
///
/// Both variants are internal faults: well-formed input never fails to hash,
/// and a hash that fails to parse was corrupted in storage.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
