use auth::AccessDecision;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::credential::models::AuthorizeRequest;
use crate::inbound::http::router::AppState;

/// Evaluate the caller's bearer token against a resource.
///
/// A missing or non-UTF-8 Authorization header is treated as empty and
/// rejected by the service like any other unusable token.
pub async fn authorize(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<AuthorizeRequestBody>,
) -> Result<ApiSuccess<AccessDecision>, ApiError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let decision = state
        .credential_service
        .authorize(AuthorizeRequest::new(authorization, body.resource))
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, decision))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorizeRequestBody {
    #[serde(default)]
    resource: String,
}
