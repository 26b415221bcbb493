use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::EmailAddress;
use crate::account::models::ForgotPasswordCommand;
use crate::account::models::LoginCommand;
use crate::account::models::Profile;
use crate::account::models::ResetPasswordCommand;
use crate::account::models::ResetToken;
use crate::account::models::SignupCommand;

/// Port for the credential lifecycle service.
///
/// The only surface the transport layer sees. Every result shape excludes
/// password material.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create a new account from validated input.
    ///
    /// # Errors
    /// * `DuplicateEmail` - An account with this normalized email exists
    /// * `Database` - Store operation failed
    async fn signup(&self, command: SignupCommand) -> Result<Profile, AccountError>;

    /// Authenticate with email and password.
    ///
    /// Unknown account and wrong password are indistinguishable to the
    /// caller.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Authentication failed
    /// * `Database` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<Profile, AccountError>;

    /// Issue a recovery token if the account exists.
    ///
    /// Returns `None` for unknown emails instead of an error; the caller must
    /// respond identically either way.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn forgot_password(
        &self,
        command: ForgotPasswordCommand,
    ) -> Result<Option<ResetToken>, AccountError>;

    /// Redeem a recovery token and replace the account's password.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `InvalidResetToken` - Token unknown, already used, or for another email
    /// * `ExpiredResetToken` - Token past its one-hour window
    /// * `Database` - Store operation failed
    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), AccountError>;

    /// Retrieve an account's profile. Pure read, no side effects.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Database` - Store operation failed
    async fn get_profile(&self, email: &EmailAddress) -> Result<Profile, AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// Uniqueness of the normalized email is the store's job (a database
/// constraint), never a read-then-write in the service.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account atomically.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Unique constraint violation on the email key
    /// * `Database` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by normalized email (None if absent).
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Replace only the password hash, leaving other fields untouched.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `Database` - Store operation failed
    async fn update_password(
        &self,
        email: &EmailAddress,
        password_hash: String,
    ) -> Result<(), AccountError>;
}

/// Persistence operations for issued reset tokens.
#[async_trait]
pub trait ResetTokenRepository: Send + Sync + 'static {
    /// Persist a freshly issued token. Earlier tokens for the same email stay
    /// live; no deduplication happens here.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn insert(&self, token: ResetToken) -> Result<ResetToken, AccountError>;

    /// Atomically look up and remove a token by value (single use).
    ///
    /// # Errors
    /// * `InvalidResetToken` - No such token
    /// * `ExpiredResetToken` - Token found but past expiry (also removed)
    /// * `Database` - Store operation failed
    async fn consume(&self, token: &str) -> Result<ResetToken, AccountError>;

    /// Remove every token whose expiry lies before `now`, returning the
    /// number of rows swept.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AccountError>;
}
