use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::account::models::EmailAddress;
use crate::account::models::ResetToken;
use crate::account::ports::ResetTokenRepository;

pub struct PostgresResetTokenRepository {
    pool: PgPool,
}

impl PostgresResetTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ResetTokenRow {
    token: String,
    email: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TryFrom<ResetTokenRow> for ResetToken {
    type Error = AccountError;

    fn try_from(row: ResetTokenRow) -> Result<Self, Self::Error> {
        Ok(ResetToken {
            email: EmailAddress::new(&row.email)?,
            token: row.token,
            created_at: row.created_at,
            expires_at: row.expires_at,
        })
    }
}

#[async_trait]
impl ResetTokenRepository for PostgresResetTokenRepository {
    async fn insert(&self, token: ResetToken) -> Result<ResetToken, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO reset_tokens (token, email, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&token.token)
        .bind(token.email.as_str())
        .bind(token.created_at)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        Ok(token)
    }

    async fn consume(&self, token: &str) -> Result<ResetToken, AccountError> {
        // DELETE .. RETURNING makes consumption atomic: of two requests
        // racing on the same token, exactly one gets the row back.
        let row = sqlx::query_as::<_, ResetTokenRow>(
            r#"
            DELETE FROM reset_tokens
            WHERE token = $1
            RETURNING token, email, created_at, expires_at
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        let record: ResetToken = row.ok_or(AccountError::InvalidResetToken)?.try_into()?;

        if record.is_expired(Utc::now()) {
            // The row is already gone, which is fine: an expired token is
            // dead either way.
            return Err(AccountError::ExpiredResetToken);
        }

        Ok(record)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AccountError> {
        let result = sqlx::query("DELETE FROM reset_tokens WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
