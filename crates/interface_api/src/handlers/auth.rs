//! Auth handlers: registration, login, token refresh

use axum::{extract::State, Json};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use core_kernel::Filter;
use domain_user::{hash_password, verify_password, User, UserResponse};

use crate::auth::{create_token, issue_token_pair, validate_token};
use crate::dto::auth::{AccessTokenResponse, AuthResponse, LoginDto, RefreshDto, RegisterUserDto};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;

/// Registers a new user and issues a token pair
pub async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterUserDto>,
) -> Result<ApiResponse<AuthResponse>, ApiError> {
    dto.validate()?;

    let existing = state
        .users
        .find_one(&Filter::new().field("email", dto.email.clone()))
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&dto.password, None).await?;
    let user = state
        .users
        .create(User {
            username: dto.username,
            email: dto.email,
            password_hash,
            avatar: dto.avatar.unwrap_or_default(),
        })
        .await?;

    info!(user_id = %user.id, "User registered");

    let tokens = issue_token_pair(user.id, &state.config)?;
    Ok(ApiResponse::ok(
        "User registered successfully",
        AuthResponse {
            user: UserResponse::from(user),
            tokens,
        },
    ))
}

/// Verifies credentials and issues a token pair
pub async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> Result<ApiResponse<AuthResponse>, ApiError> {
    dto.validate()?;

    let user = state
        .users
        .find_one(&Filter::new().field("email", dto.email.clone()))
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !verify_password(&dto.password, &user.data.password_hash).await? {
        return Err(ApiError::Unauthorized);
    }

    let tokens = issue_token_pair(user.id, &state.config)?;
    Ok(ApiResponse::ok(
        "Login successful",
        AuthResponse {
            user: UserResponse::from(user),
            tokens,
        },
    ))
}

/// Exchanges a refresh token for a fresh access token
pub async fn refresh(
    State(state): State<AppState>,
    Json(dto): Json<RefreshDto>,
) -> Result<ApiResponse<AccessTokenResponse>, ApiError> {
    let claims = validate_token(&dto.refresh_token, &state.config.jwt_refresh_secret)?;
    let user_id: Uuid = claims.sub.parse().map_err(|_| ApiError::Unauthorized)?;

    // The subject must still resolve to a live user.
    state
        .users
        .find_one(&Filter::by_id(user_id))
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let access_token = create_token(
        user_id,
        &state.config.jwt_access_secret,
        state.config.jwt_access_expiration_secs,
    )?;

    Ok(ApiResponse::ok(
        "Token refreshed successfully",
        AccessTokenResponse { access_token },
    ))
}
