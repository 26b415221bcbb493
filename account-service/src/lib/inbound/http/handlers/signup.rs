use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::account::errors::FieldError;
use crate::account::errors::PasswordPolicyError;
use crate::account::models::EmailAddress;
use crate::account::models::Password;
use crate::account::models::Profile;
use crate::account::models::SignupCommand;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    state
        .auth_service
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::CREATED, profile.into()))
}

/// HTTP request body for account creation (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
    city: String,
    country: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Missing field: {0}")]
    Field(#[from] FieldError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ParseSignupRequestError> {
        let email = EmailAddress::new(&self.email)?;
        let password = Password::new(&self.password)?;
        let command = SignupCommand::new(email, password, &self.city, &self.country)?;
        Ok(command)
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub email: String,
    pub city: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Profile> for SignupResponseData {
    fn from(profile: &Profile) -> Self {
        Self {
            email: profile.email.clone(),
            city: profile.city.clone(),
            country: profile.country.clone(),
            created_at: profile.created_at,
        }
    }
}
