//! Auth DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_user::UserResponse;

use crate::auth::TokenPair;

/// Registration payload. The password is hashed before storage; the 72-byte
/// ceiling is bcrypt's input limit.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(
        min = 8,
        max = 72,
        message = "Password must be between 8 and 72 characters"
    ))]
    pub password: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Login payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginDto {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    pub password: String,
}

/// Refresh payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshDto {
    pub refresh_token: String,
}

/// Registration/login response: the user plus the token pair
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Refresh response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}
