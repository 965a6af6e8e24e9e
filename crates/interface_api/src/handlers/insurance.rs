//! Insurance handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Document, Filter, Page, PageParams};
use domain_insurance::{Insurance, InsuranceValidator};

use crate::dto::insurance::{CreateInsuranceDto, FilterInsuranceDto, UpdateInsuranceDto};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::AppState;

/// Creates an insurance record
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<CreateInsuranceDto>,
) -> Result<ApiResponse<Document<Insurance>>, ApiError> {
    dto.validate()?;

    let insurance = dto.into_insurance();
    let result = InsuranceValidator::validate(&insurance);
    if !result.is_valid {
        return Err(ApiError::Validation(result.errors.join(", ")));
    }
    for warning in &result.warnings {
        warn!(policy_number = insurance.policy_number, "{warning}");
    }

    let data = state.insurances.create(insurance).await?;
    Ok(ApiResponse::ok("Insurance created successfully", data))
}

/// Lists all insurance records
pub async fn find_all(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<ApiResponse<Vec<Document<Insurance>>>, ApiError> {
    let data = state.insurances.find_all(&Filter::new()).await?;
    Ok(ApiResponse::ok("Insurance found successfully", data))
}

/// Lists insurance records one page at a time
pub async fn find_all_paginated(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PageParams>,
) -> Result<ApiResponse<Page<Document<Insurance>>>, ApiError> {
    let data = state
        .insurances
        .find_all_with_pagination(&Filter::new(), &params)
        .await?;
    Ok(ApiResponse::ok("Insurance found successfully", data))
}

/// Gets an insurance record by id
pub async fn find_one(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Document<Insurance>>, ApiError> {
    let data = state
        .insurances
        .find_one(&Filter::by_id(id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Enter a valid Insurance ID".to_string()))?;

    Ok(ApiResponse::ok("Insurance found successfully", data))
}

/// Gets an insurance record by business policy number.
///
/// Policy numbers are not unique at the data layer; this returns the first
/// match in creation order.
pub async fn find_by_policy_number(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(policy_number): Path<i64>,
) -> Result<ApiResponse<Document<Insurance>>, ApiError> {
    let data = state
        .insurances
        .find_one(&Filter::new().field("policyNumber", policy_number))
        .await?
        .ok_or_else(|| ApiError::NotFound("Enter a valid Insurance ID".to_string()))?;

    Ok(ApiResponse::ok("Insurance found successfully", data))
}

/// Lists insurance records matching the filter payload, one page at a time
pub async fn filter_by_user_quote(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PageParams>,
    Json(dto): Json<FilterInsuranceDto>,
) -> Result<ApiResponse<Page<Document<Insurance>>>, ApiError> {
    let filter = dto.into_filter()?;
    let data = state
        .insurances
        .find_all_with_pagination(&filter, &params)
        .await?;

    Ok(ApiResponse::ok("Insurance found successfully", data))
}

/// Partially updates an insurance record
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateInsuranceDto>,
) -> Result<ApiResponse<Document<Insurance>>, ApiError> {
    dto.validate()?;

    let patch = dto.into_patch()?;
    let data = state
        .insurances
        .update(&Filter::by_id(id), &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Enter a valid Insurance ID".to_string()))?;

    Ok(ApiResponse::ok("Insurance updated successfully", data))
}

/// Deletes an insurance record
pub async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Document<Insurance>>, ApiError> {
    let data = state
        .insurances
        .remove(&Filter::by_id(id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Enter a valid Insurance ID".to_string()))?;

    Ok(ApiResponse::ok("Insurance deleted successfully", data))
}
