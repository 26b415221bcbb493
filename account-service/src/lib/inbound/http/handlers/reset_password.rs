use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
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
use crate::account::models::ResetPasswordCommand;
use crate::inbound::http::router::AppState;

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<ApiSuccess<ResetPasswordResponseData>, ApiError> {
    state
        .auth_service
        .reset_password(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|()| {
            ApiSuccess::new(
                StatusCode::OK,
                ResetPasswordResponseData {
                    message: "Password reset successful".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequest {
    email: String,
    token: String,
    new_password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseResetPasswordRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Missing field: {0}")]
    Field(#[from] FieldError),
}

impl ResetPasswordRequest {
    fn try_into_command(self) -> Result<ResetPasswordCommand, ParseResetPasswordRequestError> {
        let email = EmailAddress::new(&self.email)?;
        let new_password = Password::new(&self.new_password)?;
        let command = ResetPasswordCommand::new(email, &self.token, new_password)?;
        Ok(command)
    }
}

impl From<ParseResetPasswordRequestError> for ApiError {
    fn from(err: ParseResetPasswordRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordResponseData {
    pub message: String,
}
