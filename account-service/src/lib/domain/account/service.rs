use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::ResetTokenGenerator;
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
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;
use crate::account::ports::ResetTokenRepository;

/// Domain service for the credential lifecycle.
///
/// Owns the decision of which store methods to call and in what order; the
/// repositories only persist. Password hashing is CPU-hard by design, so both
/// hashing and verification run on the blocking pool instead of starving the
/// async workers.
pub struct AuthService<AR, TR>
where
    AR: AccountRepository,
    TR: ResetTokenRepository,
{
    accounts: Arc<AR>,
    reset_tokens: Arc<TR>,
    password_hasher: Arc<PasswordHasher>,
    token_generator: ResetTokenGenerator,
}

impl<AR, TR> AuthService<AR, TR>
where
    AR: AccountRepository,
    TR: ResetTokenRepository,
{
    /// Create a new service with injected repositories.
    pub fn new(accounts: Arc<AR>, reset_tokens: Arc<TR>) -> Self {
        Self {
            accounts,
            reset_tokens,
            password_hasher: Arc::new(PasswordHasher::new()),
            token_generator: ResetTokenGenerator::new(),
        }
    }

    /// Sweep expired reset tokens; returns how many were removed.
    ///
    /// Called periodically by the server binary. Tokens presented for
    /// consumption after expiry are removed on the spot regardless.
    pub async fn purge_expired_tokens(&self) -> Result<u64, AccountError> {
        self.reset_tokens.delete_expired(Utc::now()).await
    }

    async fn hash_password(&self, password: String) -> Result<String, AccountError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(AccountError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AccountError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AccountError::Unknown(format!("Verification task failed: {}", e)))?
            .map_err(AccountError::from)
    }
}

#[async_trait]
impl<AR, TR> AuthServicePort for AuthService<AR, TR>
where
    AR: AccountRepository,
    TR: ResetTokenRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<Profile, AccountError> {
        // Plaintext stops here; only the hash crosses the repository boundary.
        let password_hash = self.hash_password(command.password.into_inner()).await?;

        let account = Account {
            email: command.email,
            password_hash,
            city: command.city,
            country: command.country,
            created_at: Utc::now(),
        };

        let created = self.accounts.create(account).await?;
        tracing::info!(email = %created.email, "Account created");

        Ok(Profile::from(&created))
    }

    async fn login(&self, command: LoginCommand) -> Result<Profile, AccountError> {
        // Unknown account and wrong password collapse into one error so the
        // endpoint cannot be used to probe which emails are registered.
        let account = self
            .accounts
            .find_by_email(&command.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let verified = self
            .verify_password(command.password, account.password_hash.clone())
            .await?;
        if !verified {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(Profile::from(&account))
    }

    async fn forgot_password(
        &self,
        command: ForgotPasswordCommand,
    ) -> Result<Option<ResetToken>, AccountError> {
        let account = self.accounts.find_by_email(&command.email).await?;

        let Some(account) = account else {
            // No token for unknown emails, but the caller must answer with
            // the same acknowledgement either way.
            return Ok(None);
        };

        let token = ResetToken::issue(
            account.email.clone(),
            self.token_generator.generate(),
            Utc::now(),
        );
        let token = self.reset_tokens.insert(token).await?;

        // The token value is a secret; log the issuance, never the value.
        tracing::info!(email = %account.email, "Reset token issued");

        Ok(Some(token))
    }

    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), AccountError> {
        let account = self
            .accounts
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| AccountError::NotFound(command.email.to_string()))?;

        // Single-use: consumption removes the token even when the email check
        // below fails, so a presented token can never be replayed.
        let record = self.reset_tokens.consume(&command.token).await?;
        if record.email != account.email {
            return Err(AccountError::InvalidResetToken);
        }

        let password_hash = self
            .hash_password(command.new_password.into_inner())
            .await?;
        self.accounts
            .update_password(&account.email, password_hash)
            .await?;

        tracing::info!(email = %account.email, "Password reset completed");

        Ok(())
    }

    async fn get_profile(&self, email: &EmailAddress) -> Result<Profile, AccountError> {
        self.accounts
            .find_by_email(email)
            .await?
            .map(|account| Profile::from(&account))
            .ok_or_else(|| AccountError::NotFound(email.to_string()))
    }
}
