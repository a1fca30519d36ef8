use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequestBody>,
) -> Result<ApiSuccess<()>, ApiError> {
    let command = body.try_into_command()?;

    state
        .credential_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::CREATED, ()))
}

/// HTTP request body for registering an identity (raw JSON).
///
/// Absent fields deserialize as empty strings and are rejected as missing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, CredentialError> {
        Ok(RegisterCommand::new(self.email, self.password)?)
    }
}
