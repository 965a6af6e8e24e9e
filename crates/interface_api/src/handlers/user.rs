//! User handlers
//!
//! Users are never deleted, so there is no delete route. Responses always go
//! through `UserResponse` so the stored password hash stays internal.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Filter;
use domain_user::UserResponse;

use crate::dto::user::UpdateUserDto;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::AppState;

/// Lists all users
pub async fn find_all(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<ApiResponse<Vec<UserResponse>>, ApiError> {
    let data = state
        .users
        .find_all(&Filter::new())
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(ApiResponse::ok("User found successfully", data))
}

/// Gets a user by id
pub async fn find_one(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let data = state
        .users
        .find_one(&Filter::by_id(id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Enter a valid User ID".to_string()))?;

    Ok(ApiResponse::ok(
        "User found successfully",
        UserResponse::from(data),
    ))
}

/// Partially updates a user
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateUserDto>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    dto.validate()?;

    let patch = dto.into_patch()?;
    let data = state
        .users
        .update(&Filter::by_id(id), &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Enter a valid User ID".to_string()))?;

    Ok(ApiResponse::ok(
        "User updated successfully",
        UserResponse::from(data),
    ))
}
