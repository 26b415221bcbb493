use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::EmailAddress;
use crate::account::models::Profile;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<GetProfileQuery>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let email = EmailAddress::new(&query.email)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .auth_service
        .get_profile(&email)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetProfileQuery {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub email: String,
    pub city: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileResponseData {
    fn from(profile: &Profile) -> Self {
        Self {
            email: profile.email.clone(),
            city: profile.city.clone(),
            country: profile.country.clone(),
            created_at: profile.created_at,
        }
    }
}
