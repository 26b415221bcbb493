use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::Profile;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A malformed email cannot match any account; report it exactly like one
    // that doesn't, so the endpoint stays uninformative.
    let email = EmailAddress::new(&body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let command = LoginCommand::new(email, &body.password)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .auth_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub email: String,
    pub city: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Profile> for LoginResponseData {
    fn from(profile: &Profile) -> Self {
        Self {
            email: profile.email.clone(),
            city: profile.city.clone(),
            country: profile.country.clone(),
            created_at: profile.created_at,
        }
    }
}
