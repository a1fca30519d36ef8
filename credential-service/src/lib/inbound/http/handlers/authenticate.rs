use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::AuthenticateCommand;
use crate::domain::credential::models::IssuedToken;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AuthenticateRequestBody>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let command = AuthenticateCommand::new(body.email, body.password)
        .map_err(CredentialError::from)?;

    let issued = state.credential_service.authenticate(command).await?;

    Ok(ApiSuccess::new(StatusCode::OK, issued.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

impl From<IssuedToken> for AuthenticateResponseData {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.access_token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
        }
    }
}
