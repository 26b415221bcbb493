use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::EmailAddress;
use crate::account::models::ForgotPasswordCommand;
use crate::inbound::http::router::AppState;

const GENERIC_ACK: &str = "If the email exists, a reset token has been sent";

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<ApiSuccess<ForgotPasswordResponseData>, ApiError> {
    let email = EmailAddress::new(&body.email)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let issued = state
        .auth_service
        .forgot_password(ForgotPasswordCommand::new(email))
        .await
        .map_err(ApiError::from)?;

    // Registered and unregistered emails get byte-identical responses. Only
    // the dev-mode flag ever puts the token value on the wire.
    let token = if state.expose_reset_token {
        issued.map(|t| t.token)
    } else {
        None
    };

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ForgotPasswordResponseData {
            message: GENERIC_ACK.to_string(),
            token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequest {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordResponseData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
