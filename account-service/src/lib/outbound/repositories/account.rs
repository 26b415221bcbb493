use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    email: String,
    password_hash: String,
    city: String,
    country: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            email: EmailAddress::new(&row.email)?,
            password_hash: row.password_hash,
            city: row.city,
            country: row.country,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        // Uniqueness lives in the primary key on email: two concurrent
        // signups for the same address race in the database, not here.
        sqlx::query(
            r#"
            INSERT INTO accounts (email, password_hash, city, country, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(&account.city)
        .bind(&account.country)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountError::DuplicateEmail(account.email.as_str().to_string());
                }
            }
            AccountError::Database(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT email, password_hash, city, country, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn update_password(
        &self,
        email: &EmailAddress,
        password_hash: String,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .bind(&password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(email.to_string()));
        }

        Ok(())
    }
}
