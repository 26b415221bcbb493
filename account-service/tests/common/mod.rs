use std::collections::HashMap;
use std::sync::Arc;

use account_service::account::errors::AccountError;
use account_service::account::models::Account;
use account_service::account::models::EmailAddress;
use account_service::account::models::ResetToken;
use account_service::account::ports::AccountRepository;
use account_service::account::ports::ResetTokenRepository;
use account_service::account::service::AuthService;
use account_service::inbound::http::router::create_router;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::Mutex;

/// Test application that spawns the real router on a random port.
///
/// Backed by in-memory repository doubles, so the suite runs without a
/// database; the repositories enforce the same contracts as the Postgres
/// adapters (email uniqueness, single-use token consumption, expiry).
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub reset_tokens: Arc<InMemoryResetTokenRepository>,
}

impl TestApp {
    /// Spawn in dev mode: forgot-password echoes the issued token so tests
    /// can drive the reset flow end to end.
    pub async fn spawn() -> Self {
        Self::spawn_with(true).await
    }

    /// Spawn with production behavior: tokens are never echoed.
    pub async fn spawn_in_production_mode() -> Self {
        Self::spawn_with(false).await
    }

    async fn spawn_with(expose_reset_token: bool) -> Self {
        let accounts = Arc::new(InMemoryAccountRepository::default());
        let reset_tokens = Arc::new(InMemoryResetTokenRepository::default());
        let auth_service = Arc::new(AuthService::new(accounts, Arc::clone(&reset_tokens)));

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(auth_service, expose_reset_token);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            reset_tokens,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}

#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(account.email.as_str()) {
            return Err(AccountError::DuplicateEmail(
                account.email.as_str().to_string(),
            ));
        }
        accounts.insert(account.email.as_str().to_string(), account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.get(email.as_str()).cloned())
    }

    async fn update_password(
        &self,
        email: &EmailAddress,
        password_hash: String,
    ) -> Result<(), AccountError> {
        let mut accounts = self.accounts.lock().await;
        match accounts.get_mut(email.as_str()) {
            Some(account) => {
                account.password_hash = password_hash;
                Ok(())
            }
            None => Err(AccountError::NotFound(email.to_string())),
        }
    }
}

#[derive(Default)]
pub struct InMemoryResetTokenRepository {
    tokens: Mutex<HashMap<String, ResetToken>>,
}

#[async_trait]
impl ResetTokenRepository for InMemoryResetTokenRepository {
    async fn insert(&self, token: ResetToken) -> Result<ResetToken, AccountError> {
        let mut tokens = self.tokens.lock().await;
        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn consume(&self, token: &str) -> Result<ResetToken, AccountError> {
        let mut tokens = self.tokens.lock().await;
        let record = tokens.remove(token).ok_or(AccountError::InvalidResetToken)?;
        if record.is_expired(Utc::now()) {
            return Err(AccountError::ExpiredResetToken);
        }
        Ok(record)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AccountError> {
        let mut tokens = self.tokens.lock().await;
        let before = tokens.len();
        tokens.retain(|_, record| !record.is_expired(now));
        Ok((before - tokens.len()) as u64)
    }
}
