//! API middleware and the authentication gate

use std::sync::Arc;

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use core_kernel::{Document, Filter};
use domain_user::User;

use crate::error::ApiError;
use crate::AppState;

/// The authenticated caller.
///
/// This extractor is the authentication gate; routes opt in per handler.
/// The gate:
///
/// 1. takes the bearer credential from the `Authorization` header, falling
///    back to the `access_token` cookie;
/// 2. verifies signature and expiry against the access-token secret;
/// 3. parses the subject claim as a user id;
/// 4. resolves the id against the users collection.
///
/// Every failure rejects with 401 before the handler body runs. On success
/// the raw token and the resolved user ride along into the handler.
#[derive(Clone)]
pub struct AuthUser {
    /// The raw bearer token the caller presented
    pub token: String,
    /// The resolved user document
    pub user: Arc<Document<User>>,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            warn!("Missing bearer credential");
            ApiError::Unauthorized
        })?;

        let claims =
            crate::auth::validate_token(&token, &state.config.jwt_access_secret).map_err(|e| {
                warn!("Token validation failed: {:?}", e);
                ApiError::Unauthorized
            })?;

        let user_id: Uuid = claims.sub.parse().map_err(|_| {
            warn!("Token subject is not a user id");
            ApiError::Unauthorized
        })?;

        let user = state
            .users
            .find_one(&Filter::by_id(user_id))
            .await?
            .ok_or_else(|| {
                warn!(%user_id, "Token subject resolves to no user");
                ApiError::Unauthorized
            })?;

        Ok(AuthUser {
            token,
            user: Arc::new(user),
        })
    }
}

/// Pulls the bearer token from the Authorization header or, when absent,
/// from the `access_token` cookie
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    from_header.or_else(|| cookie_value(headers, "access_token"))
}

/// Looks up a cookie by name across all Cookie headers
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(cookie_name, _)| *cookie_name == name)
        .map(|(_, value)| value.to_string())
}

/// Request logging middleware
pub async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = Utc::now();
    let response = next.run(request).await;
    let duration = Utc::now() - start;

    info!(
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
