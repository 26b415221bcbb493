use thiserror::Error;

/// Error for email address validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Error for required fields that arrived empty
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Empty(&'static str),
}

/// Top-level error for all credential lifecycle operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Missing field: {0}")]
    MissingField(#[from] FieldError),

    // Domain-level errors
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// Deliberately uninformative: covers unknown account and wrong password
    /// alike so login responses cannot be used to enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Invalid reset token")]
    InvalidResetToken,

    #[error("Reset token expired")]
    ExpiredResetToken,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
